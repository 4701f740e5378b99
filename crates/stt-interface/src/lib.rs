pub mod batch;
pub mod params;
pub mod stream;
mod word;

pub use params::{AudioEncoding, InvalidOptions, RecognizeOptions};
pub use stream::RecognizerEvent;
pub use word::Word;

mod detector;
mod parser;

pub use detector::{detect, FrontMatterKind};
pub use parser::{parse, ParseError, ParsedContent};

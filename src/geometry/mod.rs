mod rect;
mod segment;
mod triangle;

pub use rect::Rect;
pub use segment::Segment;
pub use triangle::Triangle;

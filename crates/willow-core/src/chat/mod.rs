mod chunk;

pub use chunk::StreamChunk;

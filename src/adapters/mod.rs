// Adapters layer: concrete implementations of the domain ports.

pub mod connectivity;
pub mod gemini;

pub use connectivity::TcpProbeObserver;
pub use gemini::GeminiBackend;

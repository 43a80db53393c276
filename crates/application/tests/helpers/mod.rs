pub mod mocks;

pub use mocks::{aaaa_request, request, MockNextHandler, RecordingWriter, CLIENT};

pub mod amount;
pub mod chain;
pub mod dispatcher;
mod error;
pub mod gas;
pub mod order;
pub mod quote;
pub mod quoter;
pub mod request;
pub mod selection;
pub mod service;
pub mod transformer;
pub mod types;
pub mod validation;

pub use error::{EngineError, EngineResult};
pub use request::{QuoteRequest, QuoteRequestBody, RequestDefaults};
pub use service::QuoteService;

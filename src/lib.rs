pub mod catalogue;
pub mod error;
pub mod parser;
pub mod query;
pub mod reader;
pub mod settings;
pub mod transport;

pub use error::{OmniError, Result};
pub use query::{QueryParams, Style};
pub use reader::{FetchReport, Reader};
pub use settings::Settings;
pub use transport::{HttpTransport, Transport};

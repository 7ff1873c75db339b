pub mod http;
pub mod summary_llm;
pub mod vault;

pub use summary_llm::MessagesSummaryAdapter;
pub use vault::SkyflowVaultAdapter;

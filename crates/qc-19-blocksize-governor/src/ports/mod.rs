pub mod inbound;

pub use inbound::BlockSizeGovernorApi;

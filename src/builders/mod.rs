pub mod chain_builder;
pub mod so101;

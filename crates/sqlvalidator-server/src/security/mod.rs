//! Function allow-listing

mod function_guard;
mod whitelist;

pub use function_guard::FunctionGuard;
pub use whitelist::FunctionWhitelist;

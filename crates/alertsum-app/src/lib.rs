pub mod error;
pub mod pipeline;
pub mod report_service;

#[cfg(test)]
mod test_support;

pub mod commit_message;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_support;

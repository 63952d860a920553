//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// `Some(Err(raw))` when the key is present but not a number.
    fn get_double(&self, section: &str, key: &str) -> Option<Result<f64, String>>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}

//! Key paths used to address values inside a configuration tree.

/// Something that can be split into path segments.
///
/// Strings are split on `.`; slices and vectors are taken as already split.
pub trait KeyPath {
    fn segments(&self) -> Vec<String>;

    /// Dotted form used in error messages.
    fn dotted(&self) -> String {
        self.segments().join(".")
    }
}

impl KeyPath for str {
    fn segments(&self) -> Vec<String> {
        self.split('.').map(str::to_string).collect()
    }
}

impl KeyPath for String {
    fn segments(&self) -> Vec<String> {
        self.as_str().segments()
    }
}

impl KeyPath for [&str] {
    fn segments(&self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl<const N: usize> KeyPath for [&str; N] {
    fn segments(&self) -> Vec<String> {
        self.as_slice().segments()
    }
}

impl KeyPath for Vec<&str> {
    fn segments(&self) -> Vec<String> {
        self.as_slice().segments()
    }
}

impl KeyPath for [String] {
    fn segments(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl KeyPath for Vec<String> {
    fn segments(&self) -> Vec<String> {
        self.clone()
    }
}

//! Named scalar parameter collections.
//!
//! Parameters are the boundary currency of the crate: systems expose their
//! current values as a [`Parameters`] mapping, UI collaborators send partial
//! mappings back to merge, and the shader collaborator receives the same
//! names as `uniform float` declarations plus a packed byte buffer for
//! uniform upload.
//!
//! # Example
//!
//! ```
//! use strange::params::Parameters;
//!
//! let mut update = Parameters::new();
//! update.set("rho", 24.5);
//! update.set("sigma", 0.0); // explicit zero is a real value, never ignored
//!
//! assert_eq!(update.get("rho"), Some(24.5));
//! ```

use std::collections::HashMap;

/// Ordered collection of named scalar parameters.
///
/// Order is insertion order and matters for shader declaration layout and
/// byte packing, so a system always produces its parameters in a stable
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    /// Ordered list of (name, value) pairs.
    values: Vec<(String, f64)>,
    /// Quick lookup by name.
    indices: HashMap<String, usize>,
}

impl Parameters {
    /// Create an empty parameter collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from name/value pairs, in order.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.set(name, *value);
        }
        params
    }

    /// Add or update a parameter value.
    pub fn set(&mut self, name: &str, value: f64) {
        if let Some(&idx) = self.indices.get(name) {
            self.values[idx].1 = value;
        } else {
            let idx = self.values.len();
            self.values.push((name.to_string(), value));
            self.indices.insert(name.to_string(), idx);
        }
    }

    /// Get a parameter value by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.indices.get(name).map(|&idx| self.values[idx].1)
    }

    /// Check whether a parameter exists.
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over all parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Generate `uniform float` declarations for every parameter.
    pub fn to_glsl_uniforms(&self) -> String {
        self.values
            .iter()
            .map(|(name, _)| format!("uniform float {};", name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generate `const float` declarations baking in the current values.
    pub fn to_glsl_consts(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| format!("const float {} = {:?};", name, *value as f32))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize all values as packed little-endian f32 for uniform upload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.values.len() * 4);
        for (_, value) in &self.values {
            buf.extend_from_slice(&(*value as f32).to_le_bytes());
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut params = Parameters::new();
        params.set("sigma", 10.0);
        params.set("rho", 28.0);
        params.set("sigma", 12.0); // update keeps position

        assert_eq!(params.get("sigma"), Some(12.0));
        assert_eq!(params.get("rho"), Some(28.0));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);

        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["sigma", "rho"]);
    }

    #[test]
    fn test_explicit_zero_is_stored() {
        let mut params = Parameters::new();
        params.set("b", 0.0);
        assert_eq!(params.get("b"), Some(0.0));
        assert!(params.contains("b"));
    }

    #[test]
    fn test_iter_borrows_names_from_the_collection() {
        // Callers bind the collection and collect borrowed names from it
        let params = Parameters::from_pairs(&[("alpha", 1.0), ("beta", 2.0)]);
        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_glsl_uniforms() {
        let params = Parameters::from_pairs(&[("sigma", 10.0), ("rho", 28.0)]);
        assert_eq!(
            params.to_glsl_uniforms(),
            "uniform float sigma;\nuniform float rho;"
        );
    }

    #[test]
    fn test_glsl_consts_are_float_literals() {
        let params = Parameters::from_pairs(&[("b", 0.19)]);
        let consts = params.to_glsl_consts();
        assert!(consts.starts_with("const float b = 0.19"));
        assert!(consts.ends_with(';'));
    }

    #[test]
    fn test_to_bytes_packs_f32() {
        let params = Parameters::from_pairs(&[("a", 1.0), ("b", 2.0)]);
        let bytes = params.to_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_le_bytes());
    }
}

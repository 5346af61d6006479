use secrecy::{ExposeSecret, SecretBox};

/// Key material for one transform request.
///
/// Wraps the raw key bytes so they are zeroed on drop and never end up in
/// debug output or logs.
pub struct SecretBytes {
    inner: SecretBox<Vec<u8>>,
}

impl SecretBytes {
    pub fn new(data: &[u8]) -> Self {
        Self { inner: SecretBox::new(Box::new(data.to_vec())) }
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { inner: SecretBox::new(Box::new(data)) }
    }

    pub fn expose_secret(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([... {} bytes ...])", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_leak_key() {
        let secret = SecretBytes::new(b"thisisasecretkey12345");
        let printed = format!("{secret:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("21 bytes"));
    }

    #[test]
    fn test_expose_returns_original_bytes() {
        let secret = SecretBytes::from_vec(vec![1, 2, 3]);
        assert_eq!(secret.expose_secret(), &[1, 2, 3]);
        assert_eq!(secret.len(), 3);
    }
}

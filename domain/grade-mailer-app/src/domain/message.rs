use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, PartialEq)]
pub struct SenderCredentials {
    pub address: String,
    pub password: String,
}

impl SenderCredentials {
    pub fn new(address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let credentials = SenderCredentials::new("prof@uni.edu", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("prof@uni.edu"));
        assert!(!debug.contains("hunter2"));
    }
}

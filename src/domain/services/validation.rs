pub struct EnvironmentKeyValidator;

impl EnvironmentKeyValidator {
    pub fn validate_api_key_format(api_key: &str) -> bool {
        !api_key.is_empty()
            && api_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    }

    pub fn validate_api_key(api_key: &str) -> Result<(), String> {
        if !Self::validate_api_key_format(api_key) {
            return Err(format!("Invalid environment key: {:?}", api_key));
        }
        Ok(())
    }
}

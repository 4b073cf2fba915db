use crate::foundation::LendsafeError;

pub fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value)
}

pub fn decode_hex_prefixed(value: &str) -> Result<Vec<u8>, LendsafeError> {
    let trimmed = value.trim();
    Ok(hex::decode(strip_hex_prefix(trimmed))?)
}

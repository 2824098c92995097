use uuid::Uuid;

/// A random (v4) GUID as 32 lower-case hex digits without dashes.
pub fn guid_string() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The first eight bytes of a random GUID read as a little-endian `i64`.
pub fn guid_number() -> i64 {
    let uuid = Uuid::new_v4();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&uuid.as_bytes()[..8]);
    i64::from_le_bytes(bytes)
}

/// Prefix marking arguments the workflow should treat as commands rather
/// than note identifiers.
pub const EXTENSION_PREFIX: &str = "x-fb";

/// Builds an extension argument such as `x-fb-create:My Title`.
pub fn key_value(key: &str, value: &str) -> String {
    let mut out = String::with_capacity(EXTENSION_PREFIX.len() + key.len() + value.len() + 2);
    write_key_value(&mut out, key, value);
    out
}

/// Appends an extension argument to `out`.
pub fn write_key_value(out: &mut String, key: &str, value: &str) {
    out.push_str(EXTENSION_PREFIX);
    out.push('-');
    out.push_str(key);
    out.push(':');
    out.push_str(value);
}

/// A board, its thread cache, and the listing/lookup requests.
pub mod board;
/// The global board list.
pub mod boards;
/// Posts as they appear on the wire.
pub mod post;
/// Read-only post views and attachments.
pub mod reply;
/// Threads and their incremental updates.
pub mod thread;

pub(crate) fn maybe_de_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<u32> as serde::Deserialize>::deserialize(deserializer)?;
    // If it's 1, return Some(true), if it's 0, return Some(false), else None
    Ok(value.map(|v| v == 1))
}

pub(crate) fn de_bool<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: u32 = serde::Deserialize::deserialize(d)?;
    Ok(value == 1)
}

pub(crate) mod macros {
    macro_rules! str_or_default {
        ($x:expr) => {
            $x.as_deref().unwrap_or_default()
        };
    }

    pub(crate) use str_or_default;
}

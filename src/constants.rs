// Defaults for the Gemini endpoints and the embedded placeholder image.
// Every default can be overridden from the environment (or a .env file) through the CLI flags.

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_PORT: u16 = 9900;

/// Abstract gradient SVG shown whenever image generation fails.
pub const FALLBACK_IMAGE: &str = concat!(
    "data:image/svg+xml;base64,",
    "PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSIxMDI0IiBoZWlnaHQ9IjEwMjQiIHZpZXdC",
    "b3g9IjAgMCAxMDI0IDEwMjQiPjxkZWZzPjxsaW5lYXJHcmFkaWVudCBpZD0iZ3JhZCIgeDE9IjAlIiB5MT0iMCUiIHgyPSIx",
    "MDAlIiB5Mj0iMTAwJSI+PHN0b3Agb2Zmc2V0PSIwJSIgc3R5bGU9InN0b3AtY29sb3I6IzQzMzhjYTtzdG9wLW9wYWNpdHk6",
    "MSIgLz48c3RvcCBvZmZzZXQ9IjEwMCUiIHN0eWxlPSJzdG9wLWNvbG9yOiM2ZDI4ZDk7c3RvcC1vcGFjaXR5OjEiIC8+PC9s",
    "aW5lYXJHcmFkaWVudD48L2RlZnM+PHJlY3Qgd2lkdGg9IjEwMjQiIGhlaWdodD0iMTAyNCIgZmlsbD0idXJsKCNncmFkKSIg",
    "Lz48ZyBvcGFjaXR5PSIwLjEiPjxjaXJjbGUgY3g9IjUxMiIgY3k9IjUxMiIgcj0iMzAwIiBmaWxsPSJ3aGl0ZSIvPjwvZz48",
    "dGV4dCB4PSI1MCUiIHk9IjUwJSIgZG9taW5hbnQtYmFzZWxpbmU9Im1pZGRsZSIgdGV4dC1hbmNob3I9Im1pZGRsZSIgZm9u",
    "dC1mYW1pbHk9InNhbnMtc2VyaWYiIGZvbnQtc2l6ZT0iMjQiIGZpbGw9IndoaXRlIiBvcGFjaXR5PSIwLjUiPihWaXN1YWxp",
    "emF0aW9uIFVuYXZhaWxhYmxlKQ0KPC90ZXh0Pjwvc3ZnPg==",
);

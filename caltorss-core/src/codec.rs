//! Reversible, URL-safe compression of calendar URLs.
//!
//! Tokens use LZ-string's "encoded URI component" form, so they match what the
//! JavaScript `lz-string` library produces for the same input.

use url::Url;

use crate::error::{CalToRssError, CalToRssResult};

/// Compress a calendar URL into a token that can sit in a query string as-is.
pub fn encode(url: &str) -> String {
    lz_str::compress_to_encoded_uri_component(url)
}

/// Recover the URL a token was made from.
///
/// Anything that does not decompress to an absolute URL is rejected.
pub fn decode(token: &str) -> CalToRssResult<String> {
    // Form decoding turns '+' into ' '; put them back before decompressing.
    let token = token.trim().replace(' ', "+");
    if token.is_empty() {
        return Err(CalToRssError::Decode("token is empty".into()));
    }

    let wide = lz_str::decompress_from_encoded_uri_component(token.as_str())
        .ok_or_else(|| CalToRssError::Decode("token does not decompress".into()))?;
    let url = String::from_utf16(&wide)
        .map_err(|_| CalToRssError::Decode("token decompresses to invalid text".into()))?;

    if url.is_empty() {
        return Err(CalToRssError::Decode("token decompresses to nothing".into()));
    }
    Url::parse(&url)
        .map_err(|e| CalToRssError::Decode(format!("token does not hold a URL: {e}")))?;

    Ok(url)
}

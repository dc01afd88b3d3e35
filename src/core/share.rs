//! Share links: moving a whole bulletin through a URL query parameter

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use url::Url;

use super::bulletin::Bulletin;
use super::error::{DecodeError, ShareError};

/// Query parameter carrying the share token
pub const SHARE_PARAM: &str = "data";

/// Which view the application opens in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    Display,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Edit => Mode::Display,
            Mode::Display => Mode::Edit,
        }
    }
}

/// Serialize a bulletin into a URL-safe token
pub fn encode(bulletin: &Bulletin) -> Result<String, ShareError> {
    let json = serde_json::to_string(bulletin)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Parse a share token back into a bulletin.
///
/// Tokens from the web edition (padded standard base64 over a
/// percent-encoded JSON text) are accepted too. Those were pasted into
/// the query unescaped, so a `+` may arrive as a space.
pub fn decode(token: &str) -> Result<Bulletin, DecodeError> {
    let token = token.trim();
    let bytes = match URL_SAFE_NO_PAD.decode(token) {
        Ok(bytes) => bytes,
        Err(url_safe_err) => STANDARD
            .decode(token.replace(' ', "+"))
            .map_err(|_| url_safe_err)?,
    };
    let text = String::from_utf8(bytes)?;
    let json = if text.trim_start().starts_with('{') {
        text
    } else {
        urlencoding::decode(&text).map_err(|_| DecodeError::Escape)?.into_owned()
    };
    Ok(serde_json::from_str(&json)?)
}

/// Build the absolute share address for `bulletin` on top of `base`
pub fn share_url(base: &str, bulletin: &Bulletin) -> Result<Url, ShareError> {
    let base_url = Url::parse(base).map_err(|source| ShareError::BaseAddress {
        address: base.to_string(),
        source,
    })?;
    if base_url.cannot_be_a_base() {
        return Err(ShareError::NotHierarchical(base.to_string()));
    }
    let token = encode(bulletin)?;
    let mut url = strip_share_param(&base_url);
    url.query_pairs_mut().append_pair(SHARE_PARAM, &token);
    Ok(url)
}

/// Copy of `url` without any share parameter
pub fn strip_share_param(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}

/// Outcome of reading the launch address
#[derive(Debug, Clone, PartialEq)]
pub struct Hydration {
    pub bulletin: Bulletin,
    pub mode: Mode,
    /// Launch address with the share parameter removed
    pub address: Option<Url>,
}

/// Start from a launch address: a decodable share token opens that bulletin
/// for display, anything else opens the built-in bulletin for editing.
pub fn hydrate(launch: Option<&str>) -> Hydration {
    let fallback = |address| Hydration {
        bulletin: Bulletin::default(),
        mode: Mode::Edit,
        address,
    };

    let Some(raw) = launch else {
        return fallback(None);
    };
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Ignoring launch address {:?}: {}", raw, e);
            return fallback(None);
        }
    };
    let address = Some(strip_share_param(&url));
    let token = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned());

    let Some(token) = token else {
        return fallback(address);
    };
    match decode(&token) {
        Ok(bulletin) => {
            tracing::info!("Loaded shared bulletin {}", bulletin.main.issue);
            Hydration {
                bulletin,
                mode: Mode::Display,
                address,
            }
        }
        Err(e) => {
            tracing::error!("Failed to parse bulletin data from link: {}", e);
            fallback(address)
        }
    }
}

/// Destination for share links
pub trait Clipboard {
    fn write_text(&mut self, text: String) -> Result<(), ShareError>;
}

impl Clipboard for eframe::egui::Context {
    fn write_text(&mut self, text: String) -> Result<(), ShareError> {
        self.copy_text(text);
        Ok(())
    }
}

/// Result of a share request, shown to the user as a notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Copied(String),
    Failed,
}

/// Build the share link and place it on the clipboard
pub fn share_to_clipboard(base: &str, bulletin: &Bulletin, clipboard: &mut dyn Clipboard) -> ShareOutcome {
    let result = share_url(base, bulletin).and_then(|url| {
        let link = url.to_string();
        clipboard.write_text(link.clone()).map(|()| link)
    });
    match result {
        Ok(link) => {
            tracing::info!("Copied share link ({} chars)", link.len());
            ShareOutcome::Copied(link)
        }
        Err(e) => {
            tracing::error!("Failed to copy share link: {}", e);
            ShareOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bulletin::ListSection;
    use crate::core::edit::{Edit, FieldPath, Section};
    use proptest::prelude::*;

    const BASE: &str = "http://localhost:3000/sunday1/";

    #[derive(Default)]
    struct RecordingClipboard {
        texts: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: String) -> Result<(), ShareError> {
            self.texts.push(text);
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&mut self, _text: String) -> Result<(), ShareError> {
            Err(ShareError::Clipboard("permission denied".to_string()))
        }
    }

    #[test]
    fn test_round_trip_default() {
        let bulletin = Bulletin::default();
        assert_eq!(decode(&encode(&bulletin).unwrap()).unwrap(), bulletin);
    }

    #[test]
    fn test_round_trip_keeps_empty_optionals_and_sheet() {
        let mut bulletin = Bulletin::default();
        bulletin.worship_order[0].person = Some(String::new());
        bulletin.hymn.music_sheet = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        let decoded = decode(&encode(&bulletin).unwrap()).unwrap();
        assert_eq!(decoded, bulletin);
        assert_eq!(decoded.worship_order[0].person.as_deref(), Some(""));
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode(&Bulletin::default()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("not-a-valid-token"), Err(DecodeError::Transport(_))));
        assert!(matches!(decode("!!!"), Err(DecodeError::Transport(_))));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let token = URL_SAFE_NO_PAD.encode("hello bulletin");
        assert!(decode(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_missing_section() {
        let mut value = serde_json::to_value(Bulletin::default()).unwrap();
        value.as_object_mut().unwrap().remove("schedule");
        let token = URL_SAFE_NO_PAD.encode(value.to_string());
        assert!(matches!(decode(&token), Err(DecodeError::Shape(_))));
    }

    #[test]
    fn test_decode_web_edition_token() {
        let json = serde_json::to_string(&Bulletin::default()).unwrap();
        let token = STANDARD.encode(urlencoding::encode(&json).as_bytes());
        assert!(token.contains('+'));
        assert_eq!(decode(&token).unwrap(), Bulletin::default());

        // Pasted into the query unescaped, every `+` reads back as a space
        assert_eq!(decode(&token.replace('+', " ")).unwrap(), Bulletin::default());
        let hydration = hydrate(Some(&format!("{BASE}?{SHARE_PARAM}={token}")));
        assert_eq!(hydration.mode, Mode::Display);
        assert_eq!(hydration.bulletin, Bulletin::default());
        assert_eq!(hydration.address.unwrap().as_str(), BASE);
    }

    #[test]
    fn test_share_url_replaces_existing_token() {
        let url = share_url("http://localhost:3000/sunday1/?data=old&lang=ko", &Bulletin::default()).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("lang".to_string(), "ko".to_string()));
        assert_eq!(pairs[1].0, SHARE_PARAM);
        assert_eq!(decode(&pairs[1].1).unwrap(), Bulletin::default());
    }

    #[test]
    fn test_share_url_rejects_bad_base() {
        assert!(matches!(
            share_url("not a url", &Bulletin::default()),
            Err(ShareError::BaseAddress { .. })
        ));
        assert!(matches!(
            share_url("mailto:someone@example.com", &Bulletin::default()),
            Err(ShareError::NotHierarchical(_))
        ));
    }

    #[test]
    fn test_hydrate_from_share_link() {
        let edited = Edit::scalar(FieldPath::new(Section::Main, "issue"), "제26-47호")
            .apply(&Bulletin::default())
            .unwrap();
        let link = share_url(BASE, &edited).unwrap();

        let hydration = hydrate(Some(link.as_str()));
        assert_eq!(hydration.bulletin, edited);
        assert_eq!(hydration.mode, Mode::Display);
        assert_eq!(hydration.address.unwrap().as_str(), BASE);
    }

    #[test]
    fn test_hydrate_falls_back_on_bad_token() {
        let hydration = hydrate(Some("http://localhost:3000/sunday1/?data=not-a-valid-token"));
        assert_eq!(hydration.bulletin, Bulletin::default());
        assert_eq!(hydration.mode, Mode::Edit);
        assert_eq!(hydration.address.unwrap().as_str(), BASE);
    }

    #[test]
    fn test_hydrate_without_link() {
        let hydration = hydrate(None);
        assert_eq!(hydration.mode, Mode::Edit);
        assert_eq!(hydration.address, None);

        let hydration = hydrate(Some("::::"));
        assert_eq!(hydration.mode, Mode::Edit);
        assert_eq!(hydration.bulletin, Bulletin::default());
    }

    #[test]
    fn test_share_to_clipboard() {
        let mut clipboard = RecordingClipboard::default();
        let outcome = share_to_clipboard(BASE, &Bulletin::default(), &mut clipboard);
        let ShareOutcome::Copied(link) = outcome else {
            panic!("expected a copied link");
        };
        assert_eq!(clipboard.texts, vec![link.clone()]);
        assert!(link.starts_with("http://localhost:3000/sunday1/?data="));
    }

    #[test]
    fn test_share_to_clipboard_denied() {
        let outcome = share_to_clipboard(BASE, &Bulletin::default(), &mut DeniedClipboard);
        assert_eq!(outcome, ShareOutcome::Failed);
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        let scalar = prop::sample::select(vec![
            "main.issue",
            "main.date",
            "main.time",
            "about.title",
            "about.body",
            "hymn.title",
            "news.title",
            "finance.account.bank",
            "finance.account.number",
            "finance.account.holder",
            "missionaries.title",
            "missionaries.quote",
            "schedule.title",
            "schedule.prayerList",
            "schedule.sermonList",
        ])
        .prop_flat_map(|path| {
            ".*".prop_map(move |value| Edit::scalar(path.parse().unwrap(), value))
        });
        let list = prop::sample::select(ListSection::ALL.to_vec())
            .prop_flat_map(|section| {
                let len = Bulletin::default().list_len(section);
                (
                    Just(section),
                    0..len,
                    prop::sample::select(section.fields().to_vec()),
                    ".*",
                )
            })
            .prop_map(|(section, index, field, value)| Edit::list(section, index, field, value));
        let sheet = prop::option::of(prop::collection::vec(any::<u8>(), 1..64)).prop_map(|bytes| {
            Edit::SheetMusic(bytes.map(|b| crate::core::image::embed(&b, "image/png").unwrap()))
        });
        prop_oneof![scalar, list, sheet]
    }

    proptest! {
        #[test]
        fn test_round_trip_after_edits(edits in prop::collection::vec(arb_edit(), 0..16)) {
            let mut bulletin = Bulletin::default();
            for edit in &edits {
                bulletin = edit.apply(&bulletin).unwrap();
            }
            prop_assert_eq!(decode(&encode(&bulletin).unwrap()).unwrap(), bulletin);
        }
    }
}

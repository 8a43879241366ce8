//! EXIF tags passed to `raspistill --exif`.

use crate::error::{CameraError, Result};
use crate::options::validate;

/// Upper bound on user EXIF tags accepted by `raspistill`.
pub const MAX_EXIF_TAGS: usize = 32;

/// Accumulated EXIF tags, each serialized as `name=value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifTags {
    entries: Vec<String>,
    disabled: bool,
}

impl ExifTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag, e.g. `("EXIF.MakerNote", "garden cam")`.
    ///
    /// Adding a tag after [`disable`](Self::disable) starts a fresh list.
    pub fn add(&mut self, name: &str, value: &str) -> Result<()> {
        validate::non_empty("EXIF tag name", name)?;
        validate::non_empty("EXIF tag value", value)?;

        if self.disabled {
            self.disabled = false;
            self.entries.clear();
        }

        if self.entries.len() >= MAX_EXIF_TAGS {
            return Err(CameraError::ExifOverflow {
                max: MAX_EXIF_TAGS,
            });
        }

        self.entries.push(format!("{name}={value}"));
        Ok(())
    }

    /// Drop every tag and tell the camera to write no EXIF data at all.
    pub fn disable(&mut self) {
        self.entries.clear();
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values for the repeated `--exif` flag.
    pub fn to_values(&self) -> Vec<String> {
        if self.disabled {
            vec!["none".to_owned()]
        } else {
            self.entries.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_formats_name_value() {
        let mut tags = ExifTags::new();
        tags.add("GPS.GPSAltitude", "1235/10").unwrap();
        tags.add("EXIF.MakerNote", "garden cam").unwrap();

        assert_eq!(
            tags.to_values(),
            ["GPS.GPSAltitude=1235/10", "EXIF.MakerNote=garden cam"]
        );
    }

    #[test]
    fn test_thirty_third_tag_overflows() {
        let mut tags = ExifTags::new();
        for i in 0..MAX_EXIF_TAGS {
            tags.add(&format!("IFD0.Tag{i}"), "x").unwrap();
        }

        let err = tags.add("IFD0.Extra", "x").unwrap_err();
        assert!(matches!(err, CameraError::ExifOverflow { max: 32 }));
        assert_eq!(tags.len(), MAX_EXIF_TAGS);
    }

    #[test]
    fn test_empty_name_or_value_rejected() {
        let mut tags = ExifTags::new();
        assert!(matches!(tags.add("", "x"), Err(CameraError::Validation(_))));
        assert!(matches!(
            tags.add("IFD0.Artist", ""),
            Err(CameraError::Validation(_))
        ));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_disable_overrides_entries() {
        let mut tags = ExifTags::new();
        tags.add("IFD0.Artist", "me").unwrap();
        tags.disable();

        assert!(tags.is_disabled());
        assert_eq!(tags.to_values(), ["none"]);

        tags.add("IFD0.Artist", "you").unwrap();
        assert!(!tags.is_disabled());
        assert_eq!(tags.to_values(), ["IFD0.Artist=you"]);
    }
}

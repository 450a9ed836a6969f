//! Tag-writing policy: which tag fields receive the detected key, and how.

define_ordinal_enum! {
    /// How a detected key is merged into an existing tag field.
    pub enum MetadataWrite {
        None => 0, "none",
        Prepend => 1, "prepend",
        Append => 2, "append",
        Overwrite => 3, "overwrite",
    }
}

define_ordinal_enum! {
    /// Which key labels end up in written tags.
    pub enum MetadataFormat {
        /// Canonical key names only (`Am`, `Db`, ...).
        KeysOnly => 0, "keys-only",
        /// The user's custom key codes only.
        CustomOnly => 1, "custom-only",
        /// Custom code, delimiter, canonical name.
        Both => 2, "both",
    }
}

impl Default for MetadataFormat {
    fn default() -> Self {
        MetadataFormat::KeysOnly
    }
}

/// Tag field a [`MetadataWrite`] policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Comment,
    Grouping,
    Key,
    Filename,
}

impl MetadataField {
    pub const ALL: [MetadataField; 4] = [
        MetadataField::Comment,
        MetadataField::Grouping,
        MetadataField::Key,
        MetadataField::Filename,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetadataField::Comment => "comment",
            MetadataField::Grouping => "grouping",
            MetadataField::Key => "key",
            MetadataField::Filename => "filename",
        }
    }

    /// Policy used when nothing has been stored for this field.
    pub fn default_write(&self) -> MetadataWrite {
        match self {
            MetadataField::Comment => MetadataWrite::Prepend,
            MetadataField::Grouping => MetadataWrite::None,
            MetadataField::Key => MetadataWrite::Overwrite,
            MetadataField::Filename => MetadataWrite::None,
        }
    }
}

/// External DJ library whose location is remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryKind {
    ITunes,
    Traktor,
    Serato,
}

impl LibraryKind {
    pub const ALL: [LibraryKind; 3] = [LibraryKind::ITunes, LibraryKind::Traktor, LibraryKind::Serato];

    pub fn name(&self) -> &'static str {
        match self {
            LibraryKind::ITunes => "itunes",
            LibraryKind::Traktor => "traktor",
            LibraryKind::Serato => "serato",
        }
    }
}

/// Opaque window-layout state owned by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowBlob {
    State,
    Geometry,
    SplitterState,
}

impl WindowBlob {
    pub const ALL: [WindowBlob; 3] = [WindowBlob::State, WindowBlob::Geometry, WindowBlob::SplitterState];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ordinal;

    #[test]
    fn write_mode_ordinals_are_stable() {
        assert_eq!(MetadataWrite::None.ordinal(), 0);
        assert_eq!(MetadataWrite::Prepend.ordinal(), 1);
        assert_eq!(MetadataWrite::Append.ordinal(), 2);
        assert_eq!(MetadataWrite::Overwrite.ordinal(), 3);
        assert_eq!(MetadataWrite::from_ordinal(4), None);
    }

    #[test]
    fn format_parses_cli_names() {
        assert_eq!(MetadataFormat::from_name("both"), Some(MetadataFormat::Both));
        assert_eq!(MetadataFormat::from_name("Both"), None);
        assert_eq!(MetadataFormat::default(), MetadataFormat::KeysOnly);
    }
}

/// A metadata field of the header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderField {
    Author,
    CreationDate,
    Description,
    Version,
    LastEditedBy,
    LastEditedOn,
}

impl HeaderField {
    /// Fields in rendering order. The block template puts a separator
    /// between `Description` and `Version`.
    pub const ALL: [HeaderField; 6] = [
        HeaderField::Author,
        HeaderField::CreationDate,
        HeaderField::Description,
        HeaderField::Version,
        HeaderField::LastEditedBy,
        HeaderField::LastEditedOn,
    ];

    /// Fields rewritten by an update; the others are left as created.
    pub const UPDATABLE: [HeaderField; 3] = [
        HeaderField::Version,
        HeaderField::LastEditedBy,
        HeaderField::LastEditedOn,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            HeaderField::Author => "author",
            HeaderField::CreationDate => "creation_date",
            HeaderField::Description => "description",
            HeaderField::Version => "version",
            HeaderField::LastEditedBy => "last_edited_by",
            HeaderField::LastEditedOn => "last_edited_on",
        }
    }
}

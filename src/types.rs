/// Image file name as it appears in the tag table.
/// Example: `cat.jpg`
pub type FileName = String;
/// A single tag label parsed from the `|`-delimited tag cell.
/// Examples: `animal`, `pet`, `vehicle`
pub type Tag = String;
/// Category label attached to a record; matches like one more tag.
/// Examples: `animals`, `vehicles`
pub type CategoryId = String;
/// Identifier for a trial session (UUID v4 in text form).
/// Example: `3f1c9a52-6a77-4b63-b9d4-0f6f3f8f2f11`
pub type SessionId = String;
/// Identifier for the source that produced the tag table.
/// Examples: `image_tags`, `classroom_set_b`
pub type SourceId = String;

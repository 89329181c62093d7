//! Project upload/update form state and its validation rules.

use std::collections::HashSet;

use crate::api::types::RemoteProject;
use crate::error::{ValidationErrors, ValidationFailure};

const MB: u64 = 1024 * 1024;
pub const IMAGE_LIMIT_MB: u64 = 10;
pub const VIDEO_LIMIT_MB: u64 = 100;

pub const CREATE_STATUSES: [&str; 2] = ["Pending", "Complete"];
pub const UPDATE_STATUSES: [&str; 2] = ["Draft", "Published"];
pub const CATEGORIES: [&str; 5] = [
    "Web Development",
    "Mobile App",
    "Machine Learning",
    "UI/UX Design",
    "Other",
];

/// Which file input an attachment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    Image,
    Video,
    File,
}

impl AttachmentSlot {
    /// Multipart field name.
    pub fn field(&self) -> &'static str {
        match self {
            AttachmentSlot::Image => "image",
            AttachmentSlot::Video => "video",
            AttachmentSlot::File => "file",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttachmentSlot::Image => "Image",
            AttachmentSlot::Video => "Video",
            AttachmentSlot::File => "File",
        }
    }

    pub fn limit_mb(&self) -> Option<u64> {
        match self {
            AttachmentSlot::Image => Some(IMAGE_LIMIT_MB),
            AttachmentSlot::Video => Some(VIDEO_LIMIT_MB),
            AttachmentSlot::File => None,
        }
    }
}

/// A file picked in the browser, already read into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Tags in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tags from a comma-joined string without rejecting repeats, so a
    /// later validation pass can report them.
    pub fn from_joined(joined: &str) -> Self {
        Self(
            joined
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Add a trimmed tag. Returns the stored form.
    pub fn add(&mut self, raw: &str) -> Result<String, ValidationFailure> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(ValidationFailure::EmptyTag);
        }
        if self.0.iter().any(|t| t == tag) {
            return Err(ValidationFailure::DuplicateTag(tag.to_string()));
        }
        self.0.push(tag.to_string());
        Ok(tag.to_string())
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire form: `a,b,c`.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing an existing project; file fields only replace what is sent.
    Update,
}

impl FormMode {
    pub fn statuses(&self) -> &'static [&'static str] {
        match self {
            FormMode::Create => &CREATE_STATUSES,
            FormMode::Update => &UPDATE_STATUSES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub status: String,
    pub category: String,
    pub description: String,
    pub tags: TagList,
    pub image: Option<Attachment>,
    pub video: Option<Attachment>,
    pub file: Option<Attachment>,
}

impl ProjectDraft {
    /// Prefill an update form from the stored project. Attachments start empty.
    pub fn from_remote(project: &RemoteProject) -> Self {
        let tags = project
            .tags
            .clone()
            .map(|t| t.into_tags())
            .unwrap_or_default();
        Self {
            name: project.name.clone().unwrap_or_default(),
            status: project.status.clone().unwrap_or_default(),
            category: project.category.clone().unwrap_or_default(),
            description: project.description.clone().unwrap_or_default(),
            tags: TagList(tags),
            image: None,
            video: None,
            file: None,
        }
    }

    /// Put a file into its slot if it passes the size rule for that slot.
    pub fn attach(&mut self, slot: AttachmentSlot, attachment: Attachment) -> Result<(), ValidationFailure> {
        check_attachment(slot, &attachment)?;
        *self.slot_mut(slot) = Some(attachment);
        Ok(())
    }

    pub fn detach(&mut self, slot: AttachmentSlot) {
        *self.slot_mut(slot) = None;
    }

    pub fn slot(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        match slot {
            AttachmentSlot::Image => self.image.as_ref(),
            AttachmentSlot::Video => self.video.as_ref(),
            AttachmentSlot::File => self.file.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: AttachmentSlot) -> &mut Option<Attachment> {
        match slot {
            AttachmentSlot::Image => &mut self.image,
            AttachmentSlot::Video => &mut self.video,
            AttachmentSlot::File => &mut self.file,
        }
    }

    /// Present attachments with their multipart field names.
    pub fn attachments(&self) -> impl Iterator<Item = (&'static str, &Attachment)> {
        [AttachmentSlot::Image, AttachmentSlot::Video, AttachmentSlot::File]
            .into_iter()
            .filter_map(move |slot| self.slot(slot).map(|a| (slot.field(), a)))
    }
}

/// Size rule for one slot, checked against the reported size before any
/// bytes are read.
pub fn check_size(slot: AttachmentSlot, size: u64) -> Result<(), ValidationFailure> {
    match slot.limit_mb() {
        Some(limit_mb) if size > limit_mb * MB => Err(ValidationFailure::AttachmentTooLarge {
            slot: slot.label(),
            size,
            limit_mb,
        }),
        _ => Ok(()),
    }
}

/// Size rule for one slot, applied when the user picks a file.
pub fn check_attachment(slot: AttachmentSlot, attachment: &Attachment) -> Result<(), ValidationFailure> {
    check_size(slot, attachment.size())
}

/// Every rule a draft must pass before it may be submitted.
pub fn validate_draft(draft: &ProjectDraft, mode: FormMode) -> ValidationErrors {
    let mut failures = Vec::new();

    if draft.name.trim().is_empty() {
        failures.push(ValidationFailure::MissingField("Project name"));
    }
    if mode == FormMode::Create {
        if draft.status.trim().is_empty() {
            failures.push(ValidationFailure::MissingField("Status"));
        }
        if draft.category.trim().is_empty() {
            failures.push(ValidationFailure::MissingField("Category"));
        }
        if draft.description.trim().is_empty() {
            failures.push(ValidationFailure::MissingField("Description"));
        }
        if draft.file.is_none() {
            failures.push(ValidationFailure::MissingAttachment("file"));
        }
    }

    for slot in [AttachmentSlot::Image, AttachmentSlot::Video] {
        if let Some(attachment) = draft.slot(slot) {
            if let Err(failure) = check_attachment(slot, attachment) {
                failures.push(failure);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for tag in draft.tags.as_slice() {
        if !seen.insert(tag.as_str()) && reported.insert(tag.as_str()) {
            failures.push(ValidationFailure::DuplicateTag(tag.clone()));
        }
    }

    ValidationErrors(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_of(size: usize) -> Attachment {
        Attachment::new("blob.bin", "application/octet-stream", vec![0u8; size])
    }

    fn complete_draft() -> ProjectDraft {
        ProjectDraft {
            name: "Weather Bot".into(),
            status: "Pending".into(),
            category: "Web Development".into(),
            description: "Forecasts in your terminal".into(),
            file: Some(Attachment::new("bot.zip", "application/zip", vec![1, 2, 3])),
            ..ProjectDraft::default()
        }
    }

    #[test]
    fn test_complete_draft_passes() {
        assert!(validate_draft(&complete_draft(), FormMode::Create).is_empty());
    }

    #[test]
    fn test_empty_create_draft_lists_every_missing_rule() {
        let errors = validate_draft(&ProjectDraft::default(), FormMode::Create);
        assert_eq!(
            errors.failures(),
            &[
                ValidationFailure::MissingField("Project name"),
                ValidationFailure::MissingField("Status"),
                ValidationFailure::MissingField("Category"),
                ValidationFailure::MissingField("Description"),
                ValidationFailure::MissingAttachment("file"),
            ]
        );
    }

    #[test]
    fn test_update_only_requires_name() {
        let draft = ProjectDraft {
            name: "Renamed".into(),
            ..ProjectDraft::default()
        };
        assert!(validate_draft(&draft, FormMode::Update).is_empty());
    }

    #[test]
    fn test_eleven_mb_image_rejected_on_attach() {
        let mut draft = complete_draft();
        let err = draft
            .attach(AttachmentSlot::Image, file_of(11 * 1024 * 1024))
            .unwrap_err();
        assert_eq!(err.to_string(), "Image must be less than 10MB");
        assert!(draft.image.is_none());
    }

    #[test]
    fn test_image_at_limit_accepted() {
        let mut draft = complete_draft();
        assert!(draft.attach(AttachmentSlot::Image, file_of(10 * 1024 * 1024)).is_ok());
        assert!(draft.image.is_some());
    }

    #[test]
    fn test_video_limit_is_100_mb() {
        let big = Attachment {
            bytes: vec![0u8; 100 * 1024 * 1024 + 1],
            ..Attachment::default()
        };
        assert!(matches!(
            check_attachment(AttachmentSlot::Video, &big),
            Err(ValidationFailure::AttachmentTooLarge { limit_mb: 100, .. })
        ));
        assert!(check_attachment(AttachmentSlot::File, &big).is_ok());
    }

    #[test]
    fn test_reported_size_checked_without_bytes() {
        let three_gb = 3 * 1024 * 1024 * 1024;
        assert!(matches!(
            check_size(AttachmentSlot::Video, three_gb),
            Err(ValidationFailure::AttachmentTooLarge { slot: "Video", limit_mb: 100, .. })
        ));
        assert_eq!(
            check_size(AttachmentSlot::Image, 11 * 1024 * 1024).unwrap_err().to_string(),
            "Image must be less than 10MB"
        );
        assert!(check_size(AttachmentSlot::Image, 10 * 1024 * 1024).is_ok());
        assert!(check_size(AttachmentSlot::File, three_gb).is_ok());
    }

    #[test]
    fn test_oversized_image_set_directly_still_fails_validation() {
        let mut draft = complete_draft();
        draft.image = Some(file_of(11 * 1024 * 1024));
        let errors = validate_draft(&draft, FormMode::Create);
        assert!(matches!(
            errors.failures(),
            [ValidationFailure::AttachmentTooLarge { slot: "Image", .. }]
        ));
    }

    #[test]
    fn test_tag_list_rejects_duplicates_and_blanks() {
        let mut tags = TagList::new();
        assert_eq!(tags.add("  rust ").unwrap(), "rust");
        assert_eq!(
            tags.add("rust"),
            Err(ValidationFailure::DuplicateTag("rust".into()))
        );
        assert_eq!(tags.add("   "), Err(ValidationFailure::EmptyTag));
        tags.add("wasm").unwrap();
        assert_eq!(tags.joined(), "rust,wasm");
        assert!(tags.remove("rust"));
        assert!(!tags.remove("rust"));
        assert_eq!(tags.as_slice(), &["wasm".to_string()]);
    }

    #[test]
    fn test_duplicate_tags_from_joined_reported_once() {
        let mut draft = complete_draft();
        draft.tags = TagList::from_joined("a, b, a, a");
        let errors = validate_draft(&draft, FormMode::Update);
        assert_eq!(errors.failures(), &[ValidationFailure::DuplicateTag("a".into())]);
    }

    #[test]
    fn test_attachments_iterates_present_slots_in_order() {
        let mut draft = complete_draft();
        draft.image = Some(file_of(4));
        let fields: Vec<&str> = draft.attachments().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["image", "file"]);
    }

    #[test]
    fn test_from_remote_prefills_fields() {
        let project: RemoteProject = serde_json::from_str(
            r#"{"_id":"p1","name":"Bot","status":"Draft","category":"Other","tags":"x,y","description":"d"}"#,
        )
        .unwrap();
        let draft = ProjectDraft::from_remote(&project);
        assert_eq!(draft.name, "Bot");
        assert_eq!(draft.status, "Draft");
        assert_eq!(draft.tags.joined(), "x,y");
        assert!(draft.file.is_none());
    }
}

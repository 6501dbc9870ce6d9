use crate::options::RenderOptions;
use crate::record::DocumentRecord;
use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Entries of the PDF document information dictionary
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    /// The issuing authority
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Conventionally comma separated
    pub keywords: Option<String>,
    /// Left out when [None] so that identical input produces identical bytes
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    /// What a rendered permit says about itself: its title, the permit kind, the
    /// jurisdiction as author and the permit number as keyword
    pub(crate) fn for_permit(record: &DocumentRecord, options: &RenderOptions) -> Info {
        let mut info = Info::new();
        info.title(&record.title)
            .subject(format!("{} permit", record.kind.trim()))
            .author(&options.jurisdiction);
        if let Some(number) = record.permit_number.as_deref().filter(|n| !n.trim().is_empty()) {
            info.keywords(number.trim());
        }
        if let Some(at) = options.generated_at {
            info.created(at);
        }
        info
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut info = writer.document_info(refs.gen(RefType::Info));

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        if let Some(created) = &self.created {
            info.creation_date(pdf_date(created));
        }
    }
}

fn pdf_date(at: &DateTime<FixedOffset>) -> Date {
    let offset_minutes = at.offset().local_minus_utc() / 60;
    Date::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}

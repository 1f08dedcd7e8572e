//! Parsing of semi-structured LLM replies into labeled sections.

use serde::{Deserialize, Serialize};

use crate::models::OutreachContent;

pub const DEFAULT_SUBJECT: &str = "Personalized Insurance Solution";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

impl EmailContent {
    pub fn to_content(&self) -> OutreachContent {
        let mut map = OutreachContent::new();
        map.insert("subject".into(), self.subject.clone().into());
        map.insert("body".into(), self.body.clone().into());
        map
    }
}

/// Sections of a call script. `full_script` is only set when no section
/// header was recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallScript {
    pub introduction: String,
    pub key_points: String,
    pub questions: String,
    pub objection_handling: String,
    pub close: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_script: Option<String>,
}

impl CallScript {
    fn sections_empty(&self) -> bool {
        self.introduction.is_empty()
            && self.key_points.is_empty()
            && self.questions.is_empty()
            && self.objection_handling.is_empty()
            && self.close.is_empty()
    }

    pub fn to_content(&self) -> OutreachContent {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => OutreachContent::new(),
        }
    }
}

/// Split a `Subject: … Body: …` reply.
pub fn parse_email_reply(reply: &str) -> EmailContent {
    let Some((_, after_subject)) = reply.split_once("Subject:") else {
        return EmailContent {
            subject: DEFAULT_SUBJECT.to_string(),
            body: reply.trim().to_string(),
        };
    };

    let (subject_line, rest) = after_subject
        .split_once('\n')
        .unwrap_or((after_subject, ""));

    let body = match reply.split_once("Body:") {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    };

    EmailContent {
        subject: subject_line.trim().to_string(),
        body: body.to_string(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Introduction,
    KeyPoints,
    Questions,
    ObjectionHandling,
    Close,
}

/// Header markers other than `Introduction:`, whose line text is dropped.
const HEADERS: [(&[&str], Section); 4] = [
    (&["Key Talking Points:", "Key Points:"], Section::KeyPoints),
    (&["Questions:"], Section::Questions),
    (&["Objection Handling:", "Objections:"], Section::ObjectionHandling),
    (&["Close:"], Section::Close),
];

const INTRODUCTION: &str = "Introduction:";

/// Scan lines for section headers and accumulate the lines that follow each.
pub fn parse_call_script(reply: &str) -> CallScript {
    let mut script = CallScript::default();
    let mut current: Option<Section> = None;
    let mut lines: Vec<String> = Vec::new();

    for raw in reply.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(INTRODUCTION) {
            // The open section keeps its lines rather than spilling into the introduction.
            flush(&mut script, current, &mut lines);
            current = Some(Section::Introduction);
            let remainder = line.replace(INTRODUCTION, "");
            let remainder = remainder.trim();
            if !remainder.is_empty() {
                lines.push(remainder.to_string());
            }
            continue;
        }

        if let Some(section) = header_section(line) {
            flush(&mut script, current, &mut lines);
            current = Some(section);
            continue;
        }

        if current.is_some() {
            lines.push(line.to_string());
        }
    }
    flush(&mut script, current, &mut lines);

    if script.sections_empty() {
        script.full_script = Some(reply.trim().to_string());
    }
    script
}

fn header_section(line: &str) -> Option<Section> {
    HEADERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| line.contains(m)))
        .map(|(_, section)| *section)
}

fn flush(script: &mut CallScript, section: Option<Section>, lines: &mut Vec<String>) {
    let Some(section) = section else {
        lines.clear();
        return;
    };
    if lines.is_empty() {
        return;
    }
    let text = lines.join("\n");
    lines.clear();
    let slot = match section {
        Section::Introduction => &mut script.introduction,
        Section::KeyPoints => &mut script.key_points,
        Section::Questions => &mut script.questions,
        Section::ObjectionHandling => &mut script.objection_handling,
        Section::Close => &mut script.close,
    };
    *slot = text;
}

//! X12 834 (005010X220A1) benefit enrollment generation.

use crate::model::Record;
use std::fmt;

use super::dates::normalize_date;
use super::fields::*;
use super::options::GeneratorOptions;
use super::segment::{Delimiters, Segment};
use super::stamp::StampProvider;

/// Implementation convention reference carried in GS08 and ST03.
pub const IMPLEMENTATION_REFERENCE: &str = "005010X220A1";

/// ISA12 interchange control version.
const INTERCHANGE_VERSION: &str = "00501";

/// Width of the ISA06/ISA08 interchange IDs.
const ISA_ID_WIDTH: usize = 15;

/// Largest value that fits the nine digits of ISA13.
const MAX_CONTROL_NUMBER: u32 = 999_999_999;

const DEFAULT_ELIGIBILITY_DATE: &str = "20240101";
const DEFAULT_BIRTH_DATE: &str = "19800101";

/// A generated interchange: one ISA/GS/ST envelope holding every member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interchange {
    segments: Vec<Segment>,
    member_count: usize,
    control_number: u32,
    delimiters: Delimiters,
    line_separator: String,
}

impl Interchange {
    /// All segments in emission order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments, envelope included.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of member loops (input records).
    pub fn member_count(&self) -> usize {
        self.member_count
    }

    /// Control number used throughout the envelope.
    pub fn control_number(&self) -> u32 {
        self.control_number
    }

    /// True when there was nothing to enroll.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments with the given ID, in order.
    pub fn find<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Segment> + 'a {
        self.segments.iter().filter(move |s| s.id() == id)
    }

    /// Render the whole interchange as text.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.render(&self.delimiters))
            .collect::<Vec<_>>()
            .join(&self.line_separator)
    }
}

impl fmt::Display for Interchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Per-call generation state.
struct EnvelopeContext<'a> {
    options: &'a GeneratorOptions,
    /// CCYYMMDD
    date: String,
    /// YYMMDD for ISA09
    short_date: String,
    /// HHMM
    time: String,
    control_number: u32,
    segments: Vec<Segment>,
}

impl EnvelopeContext<'_> {
    fn push<I, S>(&mut self, id: &str, elements: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments.push(Segment::new(id, elements));
    }

    /// Trimmed, delimiter-safe field value; `None` when absent or blank.
    fn field(&self, record: &Record, key: &str) -> Option<String> {
        record
            .get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| self.options.delimiters.scrub(v))
    }

    fn field_or(&self, record: &Record, key: &str, fallback: &str) -> String {
        self.field(record, key)
            .unwrap_or_else(|| fallback.to_string())
    }

    fn date_field(&self, record: &Record, key: &str) -> Option<String> {
        self.field(record, key)
            .map(|v| normalize_date(&v))
            .filter(|v| !v.is_empty())
    }

    fn flag(&self, record: &Record, key: &str) -> bool {
        self.field(record, key)
            .is_some_and(|v| v.eq_ignore_ascii_case("Y"))
    }
}

/// Generator for 834 benefit enrollment interchanges.
///
/// # Example
///
/// ```
/// use edi834::edi::{Edi834Generator, FixedStamp, GeneratorOptions};
/// use edi834::Record;
///
/// let records = vec![Record::new()
///     .with("Member ID", "100")
///     .with("Relationship Code", "18")
///     .with("Last Name", "Doe")
///     .with("First Name", "Jane")];
/// let stamp = FixedStamp::from_ymd_hm(2024, 1, 15, 9, 30, 894135).unwrap();
///
/// let interchange = Edi834Generator::new(GeneratorOptions::default()).generate(&records, &stamp);
/// assert!(interchange.render().starts_with("ISA*00*"));
/// assert_eq!(interchange.member_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Edi834Generator {
    options: GeneratorOptions,
}

impl Edi834Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate one interchange for all records.
    ///
    /// No records means no segments: the result renders as an empty string.
    pub fn generate<S: StampProvider + ?Sized>(&self, records: &[Record], stamp: &S) -> Interchange {
        let now = stamp.now();
        let control_number = stamp.control_number() % (MAX_CONTROL_NUMBER + 1);

        let mut ctx = EnvelopeContext {
            options: &self.options,
            date: now.format("%Y%m%d").to_string(),
            short_date: now.format("%y%m%d").to_string(),
            time: now.format("%H%M").to_string(),
            control_number,
            segments: Vec::new(),
        };

        if let Some(first) = records.first() {
            self.header(&mut ctx, first);
            for (i, record) in records.iter().enumerate() {
                self.member(&mut ctx, record, i + 1);
            }
            self.trailer(&mut ctx);

            tracing::info!(
                members = records.len(),
                segments = ctx.segments.len(),
                control_number,
                "generated 834 interchange"
            );
        } else {
            tracing::debug!("no records, nothing to enroll");
        }

        Interchange {
            segments: ctx.segments,
            member_count: records.len(),
            control_number,
            delimiters: self.options.delimiters,
            line_separator: self.options.line_separator.clone(),
        }
    }

    /// Generate and render in one step.
    pub fn generate_string<S: StampProvider + ?Sized>(&self, records: &[Record], stamp: &S) -> String {
        self.generate(records, stamp).render()
    }

    /// ISA, GS, ST, BGN and the sponsor/payer header loops.
    fn header(&self, ctx: &mut EnvelopeContext<'_>, first: &Record) {
        let sender = ctx.field_or(first, SENDER_ID, "SENDER01");
        let receiver = ctx.field_or(first, RECEIVER_ID, "RECEIVER01");
        let control = ctx.control_number;
        let delimiters = self.options.delimiters;
        let blank_info = " ".repeat(10);

        let isa = vec![
            "00".to_string(),
            blank_info.clone(),
            "00".to_string(),
            blank_info,
            "ZZ".to_string(),
            fixed_width(&sender, ISA_ID_WIDTH),
            "ZZ".to_string(),
            fixed_width(&receiver, ISA_ID_WIDTH),
            ctx.short_date.clone(),
            ctx.time.clone(),
            delimiters.repetition.to_string(),
            INTERCHANGE_VERSION.to_string(),
            format!("{:09}", control),
            "0".to_string(),
            self.options.usage.code().to_string(),
            delimiters.component.to_string(),
        ];
        ctx.push("ISA", isa);

        let gs = vec![
            "BE".to_string(),
            sender,
            receiver,
            ctx.date.clone(),
            ctx.time.clone(),
            control.to_string(),
            "X".to_string(),
            IMPLEMENTATION_REFERENCE.to_string(),
        ];
        ctx.push("GS", gs);

        ctx.push(
            "ST",
            [
                "834".to_string(),
                format!("{:04}", control),
                IMPLEMENTATION_REFERENCE.to_string(),
            ],
        );

        let reference = ctx.field_or(first, TRANSACTION_REFERENCE, "0");
        let purpose = ctx.field_or(first, TRANSACTION_SET_PURPOSE_CODE, "4");
        let bgn = vec![
            "00".to_string(),
            reference,
            ctx.date.clone(),
            ctx.time.clone(),
            String::new(),
            String::new(),
            String::new(),
            purpose,
        ];
        ctx.push("BGN", bgn);

        let policy = ctx.field_or(first, POLICY_NUMBER, "POL12345");
        ctx.push("REF", ["38".to_string(), policy]);

        let date = ctx.date.clone();
        ctx.push("DTP", ["007".to_string(), "D8".to_string(), date]);

        let sponsor = ctx.field_or(first, SPONSOR_NAME, "SRI HEALTH");
        let sponsor_id = ctx.field_or(first, SPONSOR_TAX_ID, "123456789");
        ctx.push(
            "N1",
            ["P5".to_string(), sponsor, "FI".to_string(), sponsor_id],
        );

        let payer = ctx.field_or(first, PAYER_NAME, "NATIONAL PAYER");
        let payer_id = ctx.field_or(first, PAYER_ID, "987654321");
        ctx.push("N1", ["IN".to_string(), payer, "FI".to_string(), payer_id]);
    }

    /// One member loop (2000) with its name, demographic and coverage segments.
    fn member(&self, ctx: &mut EnvelopeContext<'_>, record: &Record, position: usize) {
        let relationship = ctx.field_or(record, RELATIONSHIP_CODE, "18");
        let indicator = if relationship == self.options.subscriber_code {
            "Y"
        } else {
            "N"
        };
        let maintenance_type = ctx.field_or(record, MAINTENANCE_TYPE_CODE, "21");
        let generated_id = format!("MID{}", position);
        let member_id = ctx.field_or(record, MEMBER_ID, &generated_id);

        let ins = vec![
            indicator.to_string(),
            relationship,
            maintenance_type.clone(),
            String::new(),
            ctx.field_or(record, BENEFIT_STATUS_CODE, "A"),
            String::new(),
            String::new(),
            ctx.field_or(record, EMPLOYMENT_STATUS, "FT"),
            String::new(),
            ctx.field_or(record, HANDICAP_INDICATOR, "N"),
            String::new(),
            String::new(),
        ];
        ctx.push("INS", ins);

        let subscriber_number = ctx.field_or(record, SUBSCRIBER_NUMBER, &member_id);
        ctx.push("REF", ["0F".to_string(), subscriber_number]);

        for (qualifier, key) in [("1L", GROUP), ("17", SUB_GROUP_ID), ("QQ", CLASS_PLAN_ID)] {
            if let Some(value) = ctx.field(record, key) {
                ctx.push("REF", [qualifier.to_string(), value]);
            }
        }

        let begin_date = ctx.date_field(record, ELIGIBILITY_BEGIN_DATE);
        ctx.push(
            "DTP",
            [
                "356".to_string(),
                "D8".to_string(),
                begin_date
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ELIGIBILITY_DATE.to_string()),
            ],
        );

        let first_name = ctx.field_or(record, FIRST_NAME, "JOHN");
        let last_name = ctx.field_or(record, LAST_NAME, "DOE");
        let nm1 = vec![
            "IL".to_string(),
            "1".to_string(),
            last_name,
            first_name,
            ctx.field_or(record, MIDDLE_NAME, ""),
            ctx.field_or(record, NAME_SUFFIX, ""),
            String::new(),
            "34".to_string(),
            member_id,
        ];
        ctx.push("NM1", nm1);

        if let Some(contact) = ctx.field(record, CONTACT_NAME) {
            let per = vec![
                "IP".to_string(),
                contact,
                "TE".to_string(),
                ctx.field_or(record, PHONE, "9999999999"),
                "EM".to_string(),
                ctx.field_or(record, EMAIL, "noemail@example.com"),
            ];
            ctx.push("PER", per);
        }

        let n3 = [
            ctx.field_or(record, ADDRESS_1, "123 DEFAULT ST"),
            ctx.field_or(record, ADDRESS_2, ""),
        ];
        ctx.push("N3", n3);

        let n4 = [
            ctx.field_or(record, CITY, "DEFAULTCITY"),
            ctx.field_or(record, STATE, "TX"),
            ctx.field_or(record, ZIP, "75001"),
        ];
        ctx.push("N4", n4);

        let dmg = [
            "D8".to_string(),
            ctx.date_field(record, DATE_OF_BIRTH)
                .unwrap_or_else(|| DEFAULT_BIRTH_DATE.to_string()),
            ctx.field_or(record, GENDER, "U"),
        ];
        ctx.push("DMG", dmg);

        let effective_date = ctx
            .date_field(record, ELIGIBILITY_DATE)
            .or(begin_date)
            .unwrap_or_else(|| DEFAULT_ELIGIBILITY_DATE.to_string());
        ctx.push("DTP", ["348".to_string(), "D8".to_string(), effective_date]);

        let hd = [
            maintenance_type,
            ctx.field_or(record, MAINTENANCE_REASON_CODE, "XN"),
            ctx.field_or(record, INSURANCE_LINE_CODE, "HLT"),
            ctx.field_or(record, PLAN, "DEFAULTPLAN"),
            ctx.field_or(record, COVERAGE_LEVEL_CODE, "EMP"),
        ];
        ctx.push("HD", hd);

        if ctx.flag(record, INCLUDE_PRODUCT_REF) {
            let product = ctx.field_or(record, PRODUCT, "DEFAULTPRODUCT");
            ctx.push("REF", ["1L".to_string(), product]);
        }

        if ctx.flag(record, INCLUDE_PROVIDER_LOOP) {
            self.provider(ctx, record, position);
        }
    }

    /// Situational provider loop (2310).
    fn provider(&self, ctx: &mut EnvelopeContext<'_>, record: &Record, position: usize) {
        ctx.push("LX", [position.to_string()]);

        let nm1 = vec![
            "P3".to_string(),
            "2".to_string(),
            ctx.field_or(record, PROVIDER_NAME, "DEFAULT PROVIDER"),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "XX".to_string(),
            ctx.field_or(record, PROVIDER_NPI, "1999999999"),
        ];
        ctx.push("NM1", nm1);

        let n3 = [
            ctx.field_or(record, PROVIDER_ADDRESS_1, "1 PROVIDER WAY"),
            ctx.field_or(record, PROVIDER_ADDRESS_2, ""),
        ];
        ctx.push("N3", n3);

        let n4 = [
            ctx.field_or(record, PROVIDER_CITY, "AUSTIN"),
            ctx.field_or(record, PROVIDER_STATE, "TX"),
            ctx.field_or(record, PROVIDER_ZIP, "73301"),
        ];
        ctx.push("N4", n4);
    }

    /// SE, GE and IEA. SE01 counts every segment after ISA and GS emitted so far.
    fn trailer(&self, ctx: &mut EnvelopeContext<'_>) {
        let control = ctx.control_number;
        let count = ctx.segments.len() - 2;
        ctx.push("SE", [count.to_string(), format!("{:04}", control)]);
        ctx.push("GE", ["1".to_string(), control.to_string()]);
        ctx.push("IEA", ["1".to_string(), format!("{:09}", control)]);
    }
}

/// Left-justify to exactly `width` characters, truncating longer values.
fn fixed_width(value: &str, width: usize) -> String {
    format!("{:<width$.width$}", value, width = width)
}

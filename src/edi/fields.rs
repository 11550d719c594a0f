//! Spreadsheet column names read by the generator.

pub const SENDER_ID: &str = "Sender ID";
pub const RECEIVER_ID: &str = "Receiver ID";
pub const TRANSACTION_REFERENCE: &str = "Transaction Reference";
pub const TRANSACTION_SET_PURPOSE_CODE: &str = "Transaction Set Purpose Code";
pub const POLICY_NUMBER: &str = "Policy Number";
pub const SPONSOR_NAME: &str = "Sponsor Name";
pub const SPONSOR_TAX_ID: &str = "Sponsor Tax ID";
pub const PAYER_NAME: &str = "Payer Name";
pub const PAYER_ID: &str = "Payer ID";

pub const RELATIONSHIP_CODE: &str = "Relationship Code";
pub const MAINTENANCE_TYPE_CODE: &str = "Maintenance Type Code";
pub const MAINTENANCE_REASON_CODE: &str = "Maintenance Reason Code";
pub const BENEFIT_STATUS_CODE: &str = "Benefit Status Code";
pub const EMPLOYMENT_STATUS: &str = "Employment Status";
pub const HANDICAP_INDICATOR: &str = "Handicap Indicator";
pub const SUBSCRIBER_NUMBER: &str = "Subscriber Number";
pub const MEMBER_ID: &str = "Member ID";
pub const GROUP: &str = "Group";
pub const SUB_GROUP_ID: &str = "Sub Group ID";
pub const CLASS_PLAN_ID: &str = "Class Plan ID";
pub const ELIGIBILITY_BEGIN_DATE: &str = "Eligibility Begin Date";
pub const ELIGIBILITY_DATE: &str = "Eligibility Date";
pub const LAST_NAME: &str = "Last Name";
pub const FIRST_NAME: &str = "First Name";
pub const MIDDLE_NAME: &str = "Middle Name";
pub const NAME_SUFFIX: &str = "Name Suffix";
pub const CONTACT_NAME: &str = "Contact Name";
pub const PHONE: &str = "Phone";
pub const EMAIL: &str = "Email";
pub const ADDRESS_1: &str = "Address 1";
pub const ADDRESS_2: &str = "Address 2";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ZIP: &str = "Zip";
pub const DATE_OF_BIRTH: &str = "Date of Birth";
pub const GENDER: &str = "Gender";
pub const INSURANCE_LINE_CODE: &str = "Insurance Line Code";
pub const PLAN: &str = "Plan";
pub const COVERAGE_LEVEL_CODE: &str = "Coverage Level Code";

pub const INCLUDE_PRODUCT_REF: &str = "Include Product REF";
pub const PRODUCT: &str = "Product";
pub const INCLUDE_PROVIDER_LOOP: &str = "Include Provider Loop";
pub const PROVIDER_NAME: &str = "Provider Name";
pub const PROVIDER_NPI: &str = "Provider NPI";
pub const PROVIDER_ADDRESS_1: &str = "Provider Address 1";
pub const PROVIDER_ADDRESS_2: &str = "Provider Address 2";
pub const PROVIDER_CITY: &str = "Provider City";
pub const PROVIDER_STATE: &str = "Provider State";
pub const PROVIDER_ZIP: &str = "Provider Zip";

/// Columns the first record should carry for a usable enrollment file.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    SENDER_ID,
    RECEIVER_ID,
    GROUP,
    PLAN,
    PRODUCT,
    MEMBER_ID,
    RELATIONSHIP_CODE,
    LAST_NAME,
    FIRST_NAME,
];

//! Approved reply templates. Agents start from one of these and edit it before
//! running a QC check; the body rubrics are tuned so every template scores full marks.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    Update,
    Received,
    Payment,
}

impl TemplateName {
    pub const ALL: [TemplateName; 3] = [
        TemplateName::Update,
        TemplateName::Received,
        TemplateName::Payment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::Update => "update",
            TemplateName::Received => "received",
            TemplateName::Payment => "payment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateName::Update => "Progress update on an open claim",
            TemplateName::Received => "Confirmation that a new claim was received",
            TemplateName::Payment => "Notice that compensation has been paid",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown template '{s}' (expected update, received or payment)"))
    }
}

pub fn template(name: TemplateName) -> &'static str {
    match name {
        TemplateName::Update => UPDATE,
        TemplateName::Received => RECEIVED,
        TemplateName::Payment => PAYMENT,
    }
}

const UPDATE: &str = "Dear Sarah,

Thank you for your patience while we work on your claim. We are pleased to share an update on your claim reference ATC-20481 for flight BA2490.

The airline has acknowledged your claim and is now reviewing the delay details we submitted. Next steps: we will keep you updated as soon as the airline responds, usually within 14 days.

If you have any questions, please do not hesitate to contact us at support@airtravelclaim.com.

Thank you for choosing Air Travel Claim.

Kind regards,
The Air Travel Claim Team";

const RECEIVED: &str = "Dear Mr. Patel,

Thank you for submitting your claim with Air Travel Claim. We are pleased to confirm that we have received your documents and opened claim reference ATC-31877.

Next steps: our team will check your flight details and send the claim to the airline. We will be in touch within 7 days with an update.

If you have any questions, please contact us at support@airtravelclaim.com or reply to this email.

Kind regards,
The Air Travel Claim Team";

const PAYMENT: &str = "Dear Amelia,

Great news! The airline has paid the compensation for your claim reference ATC-18342, and we are delighted to let you know that your payment of EUR 400 is on its way.

Next steps: the transfer will reach your bank account within 5 working days. Thank you for trusting us with your flight claim.

If you have any questions about your payment, please do not hesitate to contact us.

Thank you for choosing Air Travel Claim.

Kind regards,
The Air Travel Claim Team";

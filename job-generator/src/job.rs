use std::fmt;

use chrono::NaiveDateTime;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::amount::Amount;
use crate::catalog::{JobCategory, HEADERS};
use crate::error::GenError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Customer {
    /// Everything but the phone number follows from the customer number.
    #[must_use]
    pub fn from_number(number: u16, phone_digits: u32) -> Self {
        Customer {
            id: format!("KH-{number:03}"),
            name: format!("Khách hàng {number:03}"),
            phone: format!("09{phone_digits:08}"),
            email: format!("customer{number}@email.com"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub fee: Amount,
}

impl Partner {
    #[must_use]
    pub fn new(number: u16, fee: Amount) -> Self {
        Partner {
            id: format!("PT-{number:03}"),
            name: format!("Partner {number:03}"),
            fee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    FullyPaid,
}

impl PaymentStatus {
    /// Picks the payment bracket from a uniform `selector` in `[0, 1)`: 30% unpaid,
    /// 30% partially paid, 40% fully paid.
    #[must_use]
    pub fn from_selector(selector: f64) -> Self {
        if selector < 0.3 {
            PaymentStatus::Unpaid
        } else if selector < 0.6 {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::FullyPaid
        }
    }

    /// The amount paid so far on `total` for this bracket. `ratio` is only used for
    /// [`PaymentStatus::PartiallyPaid`].
    ///
    /// # Errors
    /// Errors when a partial payment is asked for with a `ratio` outside `[0, 1]`
    pub fn paid_amount(self, total: Amount, ratio: f64) -> Result<Amount, GenError> {
        match self {
            PaymentStatus::Unpaid => Ok(Amount::ZERO),
            PaymentStatus::PartiallyPaid => total.portion(ratio),
            PaymentStatus::FullyPaid => Ok(total),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Chưa thanh toán",
            PaymentStatus::PartiallyPaid => "Đã TT một phần",
            PaymentStatus::FullyPaid => "Đã thanh toán hết",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    /// Outcome of a shoot that already happened, from a uniform `selector` in `[0, 1)`:
    /// 70% completed, 20% in progress, 10% cancelled.
    #[must_use]
    pub fn resolve_past(selector: f64) -> Self {
        if selector < 0.7 {
            JobStatus::Completed
        } else if selector < 0.9 {
            JobStatus::InProgress
        } else {
            JobStatus::Cancelled
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Pending => "Chờ chụp",
            JobStatus::InProgress => "Đang làm",
            JobStatus::Completed => "Hoàn thành",
            JobStatus::Cancelled => "Đã hủy",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single booking row of the jobs sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub customer: Customer,
    pub shoot_date: NaiveDateTime,
    pub location: String,
    pub category: JobCategory,
    pub total: Amount,
    pub paid: Amount,
    /// Always `total - paid`
    pub remaining: Amount,
    pub payment_status: PaymentStatus,
    pub job_status: JobStatus,
    pub drive_link: Option<String>,
    pub partner: Option<Partner>,
    pub note: Option<String>,
    pub calendar_event_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub deleted: bool,
}

impl JobRecord {
    #[must_use]
    pub fn job_id(index: u32) -> String {
        format!("JOB-{index:03}")
    }

    #[must_use]
    pub fn drive_link_for(job_id: &str) -> String {
        format!("https://drive.google.com/folder/{job_id}")
    }

    /// Zero when no partner is assigned
    #[must_use]
    pub fn partner_fee(&self) -> Amount {
        self.partner.as_ref().map_or(Amount::ZERO, |partner| partner.fee)
    }
}

impl Serialize for JobRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let partner = self.partner.as_ref();
        let mut state = serializer.serialize_struct("JobRecord", HEADERS.len())?;
        state.serialize_field(HEADERS[0], &self.id)?;
        state.serialize_field(HEADERS[1], &self.customer.id)?;
        state.serialize_field(HEADERS[2], &self.customer.name)?;
        state.serialize_field(HEADERS[3], &self.customer.phone)?;
        state.serialize_field(HEADERS[4], &self.customer.email)?;
        state.serialize_field(
            HEADERS[5],
            &self.shoot_date.format(TIMESTAMP_FORMAT).to_string(),
        )?;
        state.serialize_field(HEADERS[6], &self.location)?;
        state.serialize_field(HEADERS[7], self.category.label())?;
        state.serialize_field(HEADERS[8], &self.total)?;
        state.serialize_field(HEADERS[9], &self.paid)?;
        state.serialize_field(HEADERS[10], &self.remaining)?;
        state.serialize_field(HEADERS[11], self.payment_status.label())?;
        state.serialize_field(HEADERS[12], self.job_status.label())?;
        state.serialize_field(HEADERS[13], &self.drive_link)?;
        state.serialize_field(HEADERS[14], &partner.map(|p| p.id.as_str()))?;
        state.serialize_field(HEADERS[15], &partner.map(|p| p.name.as_str()))?;
        state.serialize_field(HEADERS[16], &self.partner_fee())?;
        state.serialize_field(HEADERS[17], &self.note)?;
        state.serialize_field(HEADERS[18], &self.calendar_event_id)?;
        state.serialize_field(
            HEADERS[19],
            &self.created_at.format(TIMESTAMP_FORMAT).to_string(),
        )?;
        state.serialize_field(HEADERS[20], if self.deleted { "TRUE" } else { "FALSE" })?;
        state.end()
    }
}

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::GenError;

/// Column headers of the jobs sheet, in output order.
pub const HEADERS: [&str; 21] = [
    "ID",
    "Customer_ID",
    "Tên khách hàng",
    "SĐT khách",
    "Email khách",
    "Ngày chụp",
    "Địa điểm",
    "Loại chụp",
    "Giá tiền",
    "Đã thanh toán",
    "Còn nợ",
    "Trạng thái TT",
    "Trạng thái Job",
    "Link Google Drive",
    "Partner_ID",
    "Tên Partner",
    "Lương Partner",
    "Ghi chú",
    "Calendar Event ID",
    "Ngày tạo",
    "Đã xóa",
];

pub const LOCATIONS: [&str; 41] = [
    "Dinh Độc Lập Q1",
    "Nhà thờ Đức Bà Q1",
    "Bưu điện Thành phố Q1",
    "Phố đi bộ Nguyễn Huệ Q1",
    "Landmark 81 Bình Thạnh",
    "Thảo Cầm Viên Q1",
    "Công viên Tao Đàn Q1",
    "Chợ Bến Thành Q1",
    "Bitexco Financial Tower Q1",
    "Lotte Cinema Q7",
    "SC VivoCity Q7",
    "Crescent Mall Q7",
    "Phú Mỹ Hưng Q7",
    "Estella Heights Q2",
    "Thảo Điền Q2",
    "Đảo Kim Cương Q2",
    "GEM Center Q1",
    "White Palace Phú Nhuận",
    "Riverside Palace Q4",
    "The Adora Q10",
    "Sheraton Hotel Q1",
    "Rex Hotel Q1",
    "Majestic Hotel Q1",
    "Park Hyatt Q1",
    "InterContinental Q1",
    "Sofitel Plaza Q1",
    "Renaissance Q10",
    "Caravelle Hotel Q1",
    "Studio ABC Q3",
    "Studio XYZ Phú Nhuận",
    "Studio Pro Gò Vấp",
    "Outdoor Củ Chi",
    "Outdoor Cần Giờ",
    "Đà Lạt",
    "Nha Trang",
    "Vũng Tàu",
    "Phú Quốc",
    "Hội An",
    "Sài Gòn Pearl Bình Thạnh",
    "Sunrise City Q7",
    "The Manor Q Bình Thạnh",
];

/// Blank entries make "no note" the most likely draw.
pub const NOTES: [&str; 10] = [
    "",
    "",
    "",
    "Khách yêu cầu chụp sớm",
    "Cần thêm phụ kiện",
    "Khách VIP",
    "Lưu ý địa điểm xa",
    "Cần 2 photographer",
    "Khách muốn style Hàn Quốc",
    "Chụp outdoor",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobCategory {
    Wedding,
    Event,
    Product,
    Personal,
    Other,
}

impl JobCategory {
    pub const ALL: [JobCategory; 5] = [
        JobCategory::Wedding,
        JobCategory::Event,
        JobCategory::Product,
        JobCategory::Personal,
        JobCategory::Other,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            JobCategory::Wedding => "Cưới",
            JobCategory::Event => "Sự kiện",
            JobCategory::Product => "Sản phẩm",
            JobCategory::Personal => "Cá nhân",
            JobCategory::Other => "Khác",
        }
    }

    /// Range of the total price, counted in [`MONETARY_UNIT`](crate::amount::MONETARY_UNIT)s
    #[must_use]
    pub const fn price_units(self) -> RangeInclusive<u64> {
        match self {
            JobCategory::Wedding => 15..=50,
            JobCategory::Event => 5..=20,
            JobCategory::Product => 2..=10,
            JobCategory::Personal => 1..=5,
            JobCategory::Other => 1..=8,
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed tables and odds a [`JobGenerator`](crate::generator::JobGenerator) draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Earliest shoot and creation time
    pub base_date: NaiveDateTime,
    /// Shoot dates fall within `base_date + [0, day_window]` days
    pub day_window: u32,
    pub customer_pool: u16,
    pub partner_pool: u16,
    pub categories: &'static [JobCategory],
    pub locations: &'static [&'static str],
    pub notes: &'static [&'static str],
    pub link_probability: f64,
    pub partner_probability: f64,
    pub partial_payment_ratio: RangeInclusive<f64>,
    pub partner_fee_ratio: RangeInclusive<f64>,
}

impl Default for Catalog {
    /// # Panics
    /// Never, the base date is a valid calendar date
    fn default() -> Self {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("2024-01-01 00:00 is a valid date");
        Catalog {
            base_date,
            day_window: 730,
            customer_pool: 100,
            partner_pool: 100,
            categories: &JobCategory::ALL,
            locations: &LOCATIONS,
            notes: &NOTES,
            link_probability: 0.7,
            partner_probability: 0.6,
            partial_payment_ratio: 0.3..=0.7,
            partner_fee_ratio: 0.15..=0.35,
        }
    }
}

impl Catalog {
    /// # Errors
    /// Errors when a table or pool the generator draws from is empty, or when a
    /// probability or ratio range does not lie within `[0, 1]`. The partner fee
    /// ratio must also be strictly positive so that only unassigned jobs carry
    /// a zero fee. The last day of the shoot window must be a representable date.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.customer_pool == 0 {
            return Err(GenError::EmptyTable("customer_pool"));
        }
        if self.partner_pool == 0 {
            return Err(GenError::EmptyTable("partner_pool"));
        }
        if self.categories.is_empty() {
            return Err(GenError::EmptyTable("categories"));
        }
        if self.locations.is_empty() {
            return Err(GenError::EmptyTable("locations"));
        }
        if self.notes.is_empty() {
            return Err(GenError::EmptyTable("notes"));
        }

        let is_probability = |p: f64| (0.0..=1.0).contains(&p);
        let is_ratio_range = |r: &RangeInclusive<f64>| {
            is_probability(*r.start()) && is_probability(*r.end()) && r.start() <= r.end()
        };
        if !is_probability(self.link_probability)
            || !is_probability(self.partner_probability)
            || !is_ratio_range(&self.partial_payment_ratio)
            || !is_ratio_range(&self.partner_fee_ratio)
            || *self.partner_fee_ratio.start() <= 0.0
        {
            return Err(GenError::InvalidRatio);
        }

        self.window_end().ok_or(GenError::InvalidDateRange)?;
        Ok(())
    }

    /// The first instant after the shoot window, `None` when it overflows
    #[must_use]
    pub fn window_end(&self) -> Option<NaiveDateTime> {
        self.base_date
            .checked_add_signed(Duration::days(i64::from(self.day_window) + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_units_widest_for_wedding() {
        let width = |c: JobCategory| c.price_units().end() - c.price_units().start();
        for category in JobCategory::ALL {
            assert!(category.price_units().start() >= &1);
            if category != JobCategory::Wedding {
                assert!(width(JobCategory::Wedding) > width(category));
            }
        }
        assert_eq!(JobCategory::Wedding.price_units(), 15..=50);
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.base_date.to_string(), "2024-01-01 00:00:00");
        assert_eq!(catalog.locations.len(), 41);
        assert_eq!(catalog.categories.len(), 5);
        assert_eq!(catalog.notes.iter().filter(|n| n.is_empty()).count(), 3);
        assert_eq!(
            catalog.window_end().unwrap().to_string(),
            "2026-01-01 00:00:00"
        );
    }

    #[test]
    fn test_validate() {
        assert!(Catalog::default().validate().is_ok());

        let catalog = Catalog {
            locations: &[],
            ..Catalog::default()
        };
        assert!(matches!(
            catalog.validate(),
            Err(GenError::EmptyTable("locations"))
        ));

        let catalog = Catalog {
            customer_pool: 0,
            ..Catalog::default()
        };
        assert!(matches!(
            catalog.validate(),
            Err(GenError::EmptyTable("customer_pool"))
        ));

        let catalog = Catalog {
            partner_fee_ratio: 0.0..=0.35,
            ..Catalog::default()
        };
        assert!(matches!(catalog.validate(), Err(GenError::InvalidRatio)));

        let catalog = Catalog {
            partial_payment_ratio: 0.7..=0.3,
            ..Catalog::default()
        };
        assert!(matches!(catalog.validate(), Err(GenError::InvalidRatio)));

        let catalog = Catalog {
            link_probability: 1.2,
            ..Catalog::default()
        };
        assert!(matches!(catalog.validate(), Err(GenError::InvalidRatio)));

        let catalog = Catalog {
            day_window: u32::MAX,
            ..Catalog::default()
        };
        assert!(matches!(catalog.validate(), Err(GenError::InvalidDateRange)));
    }

    #[test]
    fn test_headers() {
        assert_eq!(HEADERS.len(), 21);
        assert_eq!(HEADERS[0], "ID");
        assert_eq!(HEADERS[20], "Đã xóa");
    }
}

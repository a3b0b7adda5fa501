use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::amount::Amount;
use crate::catalog::Catalog;
use crate::error::GenError;
use crate::job::{Customer, JobRecord, JobStatus, Partner, PaymentStatus};

/// Number of jobs in a full sample sheet
pub const DEFAULT_JOB_COUNT: u32 = 1000;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Source of the current time, which decides whether a shoot is still pending.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug)]
pub struct JobGenerator<R, C> {
    catalog: Catalog,
    rng: R,
    clock: C,
}

impl<R: Rng, C: Clock> JobGenerator<R, C> {
    /// # Errors
    /// Errors when the `catalog` fails [`Catalog::validate`]
    pub fn new(catalog: Catalog, rng: R, clock: C) -> Result<Self, GenError> {
        catalog.validate()?;
        Ok(JobGenerator {
            catalog,
            rng,
            clock,
        })
    }

    /// Generates jobs `JOB-001` up to `count`, in order. The clock is read once,
    /// so every record is judged against the same instant.
    ///
    /// # Errors
    /// Errors when an amount can not be computed, see [`JobGenerator::generate_record`]
    pub fn generate(&mut self, count: u32) -> Result<Vec<JobRecord>, GenError> {
        let now = self.clock.now();
        let jobs = (1..=count)
            .map(|index| self.record_at(index, now))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Generated {} jobs", jobs.len());
        Ok(jobs)
    }

    /// # Errors
    /// Errors when a price, payment or fee falls outside the range of [`Amount`], or
    /// when a timestamp falls outside the supported date range
    pub fn generate_record(&mut self, index: u32) -> Result<JobRecord, GenError> {
        let now = self.clock.now();
        self.record_at(index, now)
    }

    fn record_at(&mut self, index: u32, now: NaiveDateTime) -> Result<JobRecord, GenError> {
        let id = JobRecord::job_id(index);

        let customer_number = self.rng.gen_range(1..=self.catalog.customer_pool);
        let customer =
            Customer::from_number(customer_number, self.rng.gen_range(10_000_000..=99_999_999));

        let day_offset = self.rng.gen_range(0..=self.catalog.day_window);
        let minute_of_day = self.rng.gen_range(0..MINUTES_PER_DAY);
        let shoot_date = self
            .catalog
            .base_date
            .checked_add_signed(Duration::days(i64::from(day_offset)))
            .and_then(|date| date.checked_add_signed(Duration::minutes(minute_of_day)))
            .ok_or(GenError::InvalidDateRange)?;

        let location = self
            .catalog
            .locations
            .choose(&mut self.rng)
            .ok_or(GenError::EmptyTable("locations"))?;
        let category = *self
            .catalog
            .categories
            .choose(&mut self.rng)
            .ok_or(GenError::EmptyTable("categories"))?;

        let total = Amount::from_units(self.rng.gen_range(category.price_units()))?;
        let payment_status = PaymentStatus::from_selector(self.rng.gen());
        let partial_ratio = self
            .rng
            .gen_range(self.catalog.partial_payment_ratio.clone());
        let paid = payment_status.paid_amount(total, partial_ratio)?;
        let remaining = total.checked_sub(paid)?;

        let job_status = if shoot_date > now {
            JobStatus::Pending
        } else {
            JobStatus::resolve_past(self.rng.gen())
        };

        let drive_link = self
            .rng
            .gen_bool(self.catalog.link_probability)
            .then(|| JobRecord::drive_link_for(&id));

        let partner = if self.rng.gen_bool(self.catalog.partner_probability) {
            let number = self.rng.gen_range(1..=self.catalog.partner_pool);
            let fee_ratio = self.rng.gen_range(self.catalog.partner_fee_ratio.clone());
            Some(Partner::new(number, total.portion(fee_ratio)?))
        } else {
            None
        };

        let note = self
            .catalog
            .notes
            .choose(&mut self.rng)
            .filter(|note| !note.is_empty())
            .map(|note| (*note).to_string());

        let lead_minutes = (shoot_date - self.catalog.base_date).num_minutes();
        let created_at = self
            .catalog
            .base_date
            .checked_add_signed(Duration::minutes(self.rng.gen_range(0..=lead_minutes)))
            .ok_or(GenError::InvalidDateRange)?;

        debug!(
            "{id}: {category} for {} on {shoot_date}, total {total}, paid {paid} ({payment_status}), {job_status}",
            customer.id
        );

        Ok(JobRecord {
            id,
            customer,
            shoot_date,
            location: (*location).to_string(),
            category,
            total,
            paid,
            remaining,
            payment_status,
            job_status,
            drive_link,
            partner,
            note,
            calendar_event_id: None,
            created_at,
            deleted: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::MONETARY_UNIT;
    use crate::catalog::JobCategory;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn make_generator(seed: u64, now: NaiveDateTime) -> JobGenerator<StdRng, FixedClock> {
        JobGenerator::new(
            Catalog::default(),
            StdRng::seed_from_u64(seed),
            FixedClock(now),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_record_invariants() {
        let now = at(2025, 1, 1);
        let mut generator = make_generator(7, now);
        let jobs = generator.generate(DEFAULT_JOB_COUNT).unwrap();
        assert_eq!(jobs.len(), 1000);

        let catalog = Catalog::default();
        let window_end = catalog.window_end().unwrap();
        for (i, job) in jobs.iter().enumerate() {
            assert_eq!(job.id, JobRecord::job_id(u32::try_from(i + 1).unwrap()));
            assert_eq!(job.total.checked_sub(job.paid).unwrap(), job.remaining);

            match job.payment_status {
                PaymentStatus::Unpaid => assert!(job.paid.is_zero()),
                PaymentStatus::PartiallyPaid => {
                    assert!(!job.paid.is_zero());
                    assert!(job.paid < job.total);
                }
                PaymentStatus::FullyPaid => assert_eq!(job.paid, job.total),
            }

            assert_eq!(job.job_status == JobStatus::Pending, job.shoot_date > now);
            assert_eq!(job.partner_fee().is_zero(), job.partner.is_none());

            assert!(job.shoot_date >= catalog.base_date && job.shoot_date < window_end);
            assert!(job.created_at >= catalog.base_date && job.created_at <= job.shoot_date);
            assert_eq!(job.total.value() % MONETARY_UNIT, 0);
            assert!(catalog.locations.contains(&job.location.as_str()));
            assert!(job.calendar_event_id.is_none());
            assert!(!job.deleted);

            if let Some(link) = &job.drive_link {
                assert!(link.ends_with(&job.id));
            }
            if let Some(note) = &job.note {
                assert!(!note.is_empty());
            }
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let now = at(2025, 1, 1);
        let first = make_generator(42, now).generate(50).unwrap();
        let second = make_generator(42, now).generate(50).unwrap();
        assert_eq!(first, second);

        let other = make_generator(43, now).generate(50).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_job_status_follows_clock() {
        let mut generator = make_generator(1, at(2023, 6, 1));
        let jobs = generator.generate(200).unwrap();
        assert!(jobs.iter().all(|job| job.job_status == JobStatus::Pending));

        let mut generator = make_generator(1, at(2030, 6, 1));
        let jobs = generator.generate(200).unwrap();
        assert!(jobs.iter().all(|job| job.job_status != JobStatus::Pending));
        assert!(jobs.iter().any(|job| job.job_status == JobStatus::Completed));
    }

    #[test]
    fn test_wedding_price_range() {
        let catalog = Catalog {
            categories: &[JobCategory::Wedding],
            ..Catalog::default()
        };
        let mut generator =
            JobGenerator::new(catalog, StdRng::seed_from_u64(3), FixedClock(at(2025, 1, 1)))
                .unwrap();
        for job in generator.generate(300).unwrap() {
            assert_eq!(job.category, JobCategory::Wedding);
            assert_eq!(job.total.value() % MONETARY_UNIT, 0);
            let units = job.total.value() / MONETARY_UNIT;
            assert!((15..=50).contains(&units), "{units} units");
        }
    }

    #[test]
    fn test_generate_record_uses_index() {
        let mut generator = make_generator(5, at(2025, 1, 1));
        let job = generator.generate_record(12).unwrap();
        assert_eq!(job.id, "JOB-012");
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let catalog = Catalog {
            day_window: u32::MAX,
            ..Catalog::default()
        };
        let clock = FixedClock(at(2025, 1, 1));
        let res = JobGenerator::new(catalog, StdRng::seed_from_u64(0), clock);
        assert!(matches!(res, Err(GenError::InvalidDateRange)));
    }

    #[test]
    fn test_invalid_catalog() {
        let catalog = Catalog {
            categories: &[],
            ..Catalog::default()
        };
        let res = JobGenerator::new(catalog, StdRng::seed_from_u64(0), SystemClock);
        assert!(matches!(res, Err(GenError::EmptyTable("categories"))));
    }
}

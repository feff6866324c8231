//! Read-only views over rental history: printed receipts, CSV export and summary figures.

use crate::model::{Customer, Rental};
use crate::pricing::{format_gbp, to_pennies, RentalPeriod, TAX_RATE};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io::Write;

/// A rental laid out the way the counter prints it.
pub struct Receipt<'a> {
    pub rental: &'a Rental,
    pub customer: Option<&'a Customer>,
}

impl<'a> Receipt<'a> {
    pub fn new(rental: &'a Rental, customer: Option<&'a Customer>) -> Self {
        Self { rental, customer }
    }
}

impl Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.rental;
        writeln!(f, "{:<14}{}", "Receipt Ref:", r.receipt_ref)?;
        writeln!(f, "{:<14}{}", "Date:", r.created_at.format("%Y-%m-%d %H:%M"))?;
        match self.customer {
            Some(c) => writeln!(f, "{:<14}{} ({})", "Customer:", c.name, c.id)?,
            None => writeln!(f, "{:<14}{}", "Customer:", r.customer_id)?,
        }
        writeln!(f, "{:<14}{} {}", "Product:", r.product_type, r.product_code)?;
        writeln!(
            f,
            "{:<14}{} days @ {}/day",
            "Period:",
            r.no_days,
            format_gbp(r.cost_per_day)
        )?;
        writeln!(f, "{:<14}{}%", "Discount:", r.discount_percent.normalize())?;
        writeln!(f, "{:<14}£{}", "Credit limit:", r.credit_limit.normalize())?;
        if let Some(method) = &r.terms.payment_method {
            writeln!(f, "{:<14}{}", "Payment:", method)?;
        }
        writeln!(f, "{:<14}{}", "Subtotal:", format_gbp(r.subtotal))?;
        writeln!(
            f,
            "{:<14}{}",
            format!("Tax ({}%):", (TAX_RATE * Decimal::ONE_HUNDRED).normalize()),
            format_gbp(r.tax)
        )?;
        write!(f, "{:<14}{}", "Total:", format_gbp(r.total))
    }
}

const CSV_HEADER: [&str; 14] = [
    "rental_id",
    "receipt_ref",
    "customer_id",
    "product_type",
    "product_code",
    "no_days",
    "cost_per_day",
    "discount",
    "credit_limit",
    "subtotal",
    "tax",
    "total",
    "payment_method",
    "created_date",
];

fn money(amount: Decimal) -> String {
    format!("{:.2}", to_pennies(amount))
}

/// Writes one CSV row per rental, after a header row. Returns the number of data rows.
pub fn write_history_csv<W: Write>(rentals: &[Rental], out: W) -> Result<usize, csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for r in rentals {
        writer.write_record([
            r.id.0.to_string(),
            r.receipt_ref.clone(),
            r.customer_id.0.to_string(),
            r.product_type.clone(),
            r.product_code.clone(),
            r.no_days.to_string(),
            money(r.cost_per_day),
            r.discount_percent.normalize().to_string(),
            r.credit_limit.normalize().to_string(),
            money(r.subtotal),
            money(r.tax),
            money(r.total),
            r.terms.payment_method.clone().unwrap_or_default(),
            r.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(rentals.len())
}

/// Figures for one product type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSummary {
    pub product_type: String,
    pub rentals: usize,
    pub days: u64,
    pub revenue: Decimal,
}

/// Summary figures over a set of rentals, the data behind the analytics charts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RentalAnalytics {
    pub rentals: usize,
    pub total_revenue: Decimal,
    /// Ordered by product type.
    pub by_type: Vec<TypeSummary>,
    /// Bookings per period tier, in tier order. Rentals whose day count matches no tier
    /// are left out.
    pub by_period: Vec<(RentalPeriod, usize)>,
}

impl RentalAnalytics {
    pub fn from_rentals(rentals: &[Rental]) -> Self {
        let mut by_type: BTreeMap<&str, TypeSummary> = BTreeMap::new();
        let mut by_period: Vec<(RentalPeriod, usize)> =
            RentalPeriod::ALL.iter().map(|p| (*p, 0)).collect();
        let mut total_revenue = Decimal::ZERO;

        for r in rentals {
            total_revenue += r.total;

            let entry = by_type
                .entry(r.product_type.as_str())
                .or_insert_with(|| TypeSummary {
                    product_type: r.product_type.clone(),
                    rentals: 0,
                    days: 0,
                    revenue: Decimal::ZERO,
                });
            entry.rentals += 1;
            entry.days += u64::from(r.no_days);
            entry.revenue += r.total;

            if let Some(slot) = by_period
                .iter_mut()
                .find(|(p, _)| p.day_count() == r.no_days)
            {
                slot.1 += 1;
            }
        }

        Self {
            rentals: rentals.len(),
            total_revenue,
            by_type: by_type.into_values().collect(),
            by_period,
        }
    }
}

impl Display for RentalAnalytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rentals: {}   Revenue: {}", self.rentals, format_gbp(self.total_revenue))?;
        writeln!(f)?;
        writeln!(f, "{:<12} {:>7} {:>7} {:>12}", "Type", "Rentals", "Days", "Revenue")?;
        for t in &self.by_type {
            writeln!(
                f,
                "{:<12} {:>7} {:>7} {:>12}",
                t.product_type,
                t.rentals,
                t.days,
                format_gbp(t.revenue)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:<14} {:>7}", "Period", "Rentals")?;
        for (period, count) in &self.by_period {
            writeln!(f, "{:<14} {:>7}", period.label(), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountTerms, CustomerId, RentalId};
    use crate::pricing::Quote;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn rental(id: i64, product_type: &str, rate: &str, period: RentalPeriod) -> Rental {
        let q = Quote::new(Decimal::from_str(rate).unwrap(), period).unwrap();
        Rental {
            id: RentalId(id),
            customer_id: CustomerId(1),
            receipt_ref: format!("{}", 20000 + id),
            product_type: product_type.to_string(),
            product_code: format!("{}1", product_type.to_uppercase()),
            no_days: q.day_count,
            cost_per_day: q.cost_per_day,
            credit_limit: q.credit_limit,
            discount_percent: q.discount_percent,
            terms: AccountTerms {
                payment_method: Some("Cash".into()),
                ..AccountTerms::default()
            },
            subtotal: q.subtotal,
            tax: q.tax,
            total: q.total,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_receipt_shows_pounds_and_pence() {
        let r = rental(1, "Car", "12.00", RentalPeriod::UpTo30Days);
        let text = Receipt::new(&r, None).to_string();
        assert!(text.contains("Receipt Ref:  20001"));
        assert!(text.contains("30 days @ £12.00/day"));
        assert!(text.contains("Discount:     5%"));
        assert!(text.contains("Credit limit: £150"));
        assert!(text.contains("Tax (15%):    £51.30"));
        assert!(text.ends_with("Total:        £393.30"));
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_rental() {
        let rentals = vec![
            rental(1, "Car", "12.00", RentalPeriod::UpTo30Days),
            rental(2, "Van", "19.00", RentalPeriod::UpTo365Days),
        ];
        let mut out = Vec::new();
        let written = write_history_csv(&rentals, &mut out).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rental_id,receipt_ref,customer_id"));
        assert_eq!(
            lines[1],
            "1,20001,1,Car,CAR1,30,12.00,5,150,342.00,51.30,393.30,Cash,2024-03-01 09:30:00"
        );
        assert!(lines[2].contains(",5548.00,832.20,6380.20,"));
    }

    #[test]
    fn test_analytics_aggregates_per_type_and_period() {
        let rentals = vec![
            rental(1, "Car", "12.00", RentalPeriod::UpTo30Days),
            rental(2, "Car", "12.00", RentalPeriod::UpTo90Days),
            rental(3, "Van", "19.00", RentalPeriod::UpTo30Days),
        ];
        let stats = RentalAnalytics::from_rentals(&rentals);

        assert_eq!(stats.rentals, 3);
        assert_eq!(
            stats.total_revenue,
            rentals.iter().map(|r| r.total).sum::<Decimal>()
        );
        assert_eq!(stats.by_type.len(), 2);
        let car = &stats.by_type[0];
        assert_eq!(car.product_type, "Car");
        assert_eq!(car.rentals, 2);
        assert_eq!(car.days, 120);
        assert_eq!(car.revenue, rentals[0].total + rentals[1].total);
        assert_eq!(stats.by_type[1].product_type, "Van");

        assert_eq!(
            stats.by_period,
            vec![
                (RentalPeriod::UpTo30Days, 2),
                (RentalPeriod::UpTo90Days, 1),
                (RentalPeriod::UpTo270Days, 0),
                (RentalPeriod::UpTo365Days, 0),
            ]
        );
    }

    #[test]
    fn test_analytics_of_nothing() {
        let stats = RentalAnalytics::from_rentals(&[]);
        assert_eq!(stats.rentals, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert!(stats.by_type.is_empty());
    }
}

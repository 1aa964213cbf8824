// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business table mutations.
//!
//! Every statement here touches a single table. Ordering across tables is
//! the caller's responsibility; the store only guarantees that foreign keys
//! are enforced.

use diesel::SqliteConnection;
use diesel::prelude::*;
use stepline_domain::{BusinessTable, NewRecord};
use time::PrimitiveDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::{
    classes, enrollment_logs, enrollments, instructor_payouts, instructors, ledger_entries,
    members, payments, rates,
};
use crate::error::PersistenceError;

/// Format of the `created_at` and `updated_at` columns.
const TIMESTAMP_FORMAT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a record timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: PrimitiveDateTime) -> Result<String, PersistenceError> {
    Ok(at.format(TIMESTAMP_FORMAT)?)
}

/// Deletes every row of a business table.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `table` - The table to empty
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if rows of another table
/// still reference this one.
pub fn delete_all_rows(
    conn: &mut SqliteConnection,
    table: BusinessTable,
) -> Result<usize, PersistenceError> {
    let rows: usize = match table {
        BusinessTable::InstructorPayouts => {
            diesel::delete(instructor_payouts::table).execute(conn)
        }
        BusinessTable::EnrollmentLogs => diesel::delete(enrollment_logs::table).execute(conn),
        BusinessTable::LedgerEntries => diesel::delete(ledger_entries::table).execute(conn),
        BusinessTable::Payments => diesel::delete(payments::table).execute(conn),
        BusinessTable::Enrollments => diesel::delete(enrollments::table).execute(conn),
        BusinessTable::Members => diesel::delete(members::table).execute(conn),
        BusinessTable::Classes => diesel::delete(classes::table).execute(conn),
        BusinessTable::Rates => diesel::delete(rates::table).execute(conn),
        BusinessTable::Instructors => diesel::delete(instructors::table).execute(conn),
    }?;

    debug!(table = %table, rows, "Deleted all rows");
    Ok(rows)
}

/// Inserts a business row stamped with `recorded_at`, returning its id.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the row references a
/// missing parent or violates a check constraint.
pub fn insert_record(
    conn: &mut SqliteConnection,
    record: &NewRecord,
    recorded_at: PrimitiveDateTime,
) -> Result<i64, PersistenceError> {
    let stamp: String = format_timestamp(recorded_at)?;

    match record {
        NewRecord::Instructor(instructor) => diesel::insert_into(instructors::table)
            .values((
                instructors::name.eq(&instructor.name),
                instructors::email.eq(instructor.email.as_deref()),
                instructors::created_at.eq(&stamp),
                instructors::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::Rate(rate) => diesel::insert_into(rates::table)
            .values((
                rates::name.eq(&rate.name),
                rates::monthly_fee_cents.eq(rate.monthly_fee_cents),
                rates::instructor_share_percent.eq(rate.instructor_share_percent),
                rates::created_at.eq(&stamp),
                rates::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::Class(class) => diesel::insert_into(classes::table)
            .values((
                classes::name.eq(&class.name),
                classes::instructor_id.eq(class.instructor_id),
                classes::rate_id.eq(class.rate_id),
                classes::weekday.eq(&class.weekday),
                classes::start_time.eq(&class.start_time),
                classes::created_at.eq(&stamp),
                classes::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::Member(member) => diesel::insert_into(members::table)
            .values((
                members::full_name.eq(&member.full_name),
                members::phone.eq(member.phone.as_deref()),
                members::status.eq(member.status.as_str()),
                members::freeze_start_date.eq(member.freeze_start_date.map(String::from)),
                members::freeze_end_date.eq(member.freeze_end_date.map(String::from)),
                members::joined_on.eq(member.joined_on.to_string()),
                members::created_at.eq(&stamp),
                members::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::Enrollment(enrollment) => diesel::insert_into(enrollments::table)
            .values((
                enrollments::member_id.eq(enrollment.member_id),
                enrollments::class_id.eq(enrollment.class_id),
                enrollments::start_date.eq(enrollment.start_date.to_string()),
                enrollments::next_due_date.eq(enrollment.next_due_date.to_string()),
                enrollments::status.eq(enrollment.status.as_str()),
                enrollments::created_at.eq(&stamp),
                enrollments::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::Payment(payment) => diesel::insert_into(payments::table)
            .values((
                payments::enrollment_id.eq(payment.enrollment_id),
                payments::amount_cents.eq(payment.amount_cents),
                payments::paid_on.eq(payment.paid_on.to_string()),
                payments::period_start.eq(payment.period_start.to_string()),
                payments::period_end.eq(payment.period_end.to_string()),
                payments::created_at.eq(&stamp),
                payments::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::LedgerEntry(entry) => diesel::insert_into(ledger_entries::table)
            .values((
                ledger_entries::enrollment_id.eq(entry.enrollment_id),
                ledger_entries::kind.eq(entry.kind.as_str()),
                ledger_entries::amount_cents.eq(entry.amount_cents),
                ledger_entries::entry_date.eq(entry.entry_date.to_string()),
                ledger_entries::description.eq(&entry.description),
                ledger_entries::created_at.eq(&stamp),
                ledger_entries::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::Payout(payout) => diesel::insert_into(instructor_payouts::table)
            .values((
                instructor_payouts::instructor_id.eq(payout.instructor_id),
                instructor_payouts::enrollment_id.eq(payout.enrollment_id),
                instructor_payouts::payment_id.eq(payout.payment_id),
                instructor_payouts::amount_cents.eq(payout.amount_cents),
                instructor_payouts::earned_on.eq(payout.earned_on.to_string()),
                instructor_payouts::matures_on.eq(payout.matures_on.to_string()),
                instructor_payouts::created_at.eq(&stamp),
                instructor_payouts::updated_at.eq(&stamp),
            ))
            .execute(conn),
        NewRecord::EnrollmentLog(log) => diesel::insert_into(enrollment_logs::table)
            .values((
                enrollment_logs::enrollment_id.eq(log.enrollment_id),
                enrollment_logs::event.eq(&log.event),
                enrollment_logs::event_date.eq(log.event_date.to_string()),
                enrollment_logs::created_at.eq(&stamp),
                enrollment_logs::updated_at.eq(&stamp),
            ))
            .execute(conn),
    }?;

    let id: i64 = last_insert_rowid(conn)?;
    debug!(table = %record.table(), id, "Inserted row");
    Ok(id)
}

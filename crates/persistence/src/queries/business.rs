// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business table queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use stepline_domain::{BusinessTable, RecordLookup};
use tracing::debug;

use crate::data_models::{EnrollmentData, MemberData, PayoutData};
use crate::diesel_schema::{
    classes, enrollment_logs, enrollments, instructor_payouts, instructors, ledger_entries,
    members, payments, rates,
};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = members)]
struct MemberRow {
    member_id: i64,
    full_name: String,
    phone: Option<String>,
    status: String,
    freeze_start_date: Option<String>,
    freeze_end_date: Option<String>,
    joined_on: String,
}

/// Counts the rows of a business table.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_rows(
    conn: &mut SqliteConnection,
    table: BusinessTable,
) -> Result<usize, PersistenceError> {
    let count: i64 = match table {
        BusinessTable::InstructorPayouts => instructor_payouts::table.count().get_result(conn),
        BusinessTable::EnrollmentLogs => enrollment_logs::table.count().get_result(conn),
        BusinessTable::LedgerEntries => ledger_entries::table.count().get_result(conn),
        BusinessTable::Payments => payments::table.count().get_result(conn),
        BusinessTable::Enrollments => enrollments::table.count().get_result(conn),
        BusinessTable::Members => members::table.count().get_result(conn),
        BusinessTable::Classes => classes::table.count().get_result(conn),
        BusinessTable::Rates => rates::table.count().get_result(conn),
        BusinessTable::Instructors => instructors::table.count().get_result(conn),
    }?;

    usize::try_from(count).map_err(|e| PersistenceError::InvalidData(e.to_string()))
}

/// Finds the id of the first row matching `lookup`.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no row matches.
pub fn lookup_record(
    conn: &mut SqliteConnection,
    lookup: &RecordLookup,
) -> Result<Option<i64>, PersistenceError> {
    debug!(table = %lookup.table(), "Looking up existing row");

    let id: Option<i64> = match lookup {
        RecordLookup::InstructorByName(name) => instructors::table
            .filter(instructors::name.eq(name))
            .select(instructors::instructor_id)
            .order_by(instructors::instructor_id.asc())
            .first(conn)
            .optional(),
        RecordLookup::RateByName(name) => rates::table
            .filter(rates::name.eq(name))
            .select(rates::rate_id)
            .order_by(rates::rate_id.asc())
            .first(conn)
            .optional(),
        RecordLookup::ClassByName(name) => classes::table
            .filter(classes::name.eq(name))
            .select(classes::class_id)
            .order_by(classes::class_id.asc())
            .first(conn)
            .optional(),
    }?;

    Ok(id)
}

/// Lists all members ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_members(conn: &mut SqliteConnection) -> Result<Vec<MemberData>, PersistenceError> {
    let rows: Vec<MemberRow> = members::table
        .select(MemberRow::as_select())
        .order_by((members::full_name.asc(), members::member_id.asc()))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| MemberData {
            member_id: row.member_id,
            full_name: row.full_name,
            phone: row.phone,
            status: row.status,
            freeze_start_date: row.freeze_start_date,
            freeze_end_date: row.freeze_end_date,
            joined_on: row.joined_on,
        })
        .collect())
}

/// Lists all enrollments with their class names.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_enrollments(
    conn: &mut SqliteConnection,
) -> Result<Vec<EnrollmentData>, PersistenceError> {
    let rows: Vec<(i64, i64, i64, String, String, String, String)> = enrollments::table
        .inner_join(classes::table)
        .select((
            enrollments::enrollment_id,
            enrollments::member_id,
            enrollments::class_id,
            classes::name,
            enrollments::start_date,
            enrollments::next_due_date,
            enrollments::status,
        ))
        .order_by(enrollments::enrollment_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                enrollment_id,
                member_id,
                class_id,
                class_name,
                start_date,
                next_due_date,
                status,
            )| EnrollmentData {
                enrollment_id,
                member_id,
                class_id,
                class_name,
                start_date,
                next_due_date,
                status,
            },
        )
        .collect())
}

/// Lists all instructor payouts with instructor names, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_payouts(conn: &mut SqliteConnection) -> Result<Vec<PayoutData>, PersistenceError> {
    #[allow(clippy::type_complexity)]
    let rows: Vec<(i64, i64, String, i64, i64, i64, String, String, i32)> =
        instructor_payouts::table
            .inner_join(instructors::table)
            .select((
                instructor_payouts::payout_id,
                instructor_payouts::instructor_id,
                instructors::name,
                instructor_payouts::enrollment_id,
                instructor_payouts::payment_id,
                instructor_payouts::amount_cents,
                instructor_payouts::earned_on,
                instructor_payouts::matures_on,
                instructor_payouts::paid_out,
            ))
            .order_by((
                instructor_payouts::earned_on.asc(),
                instructor_payouts::payout_id.asc(),
            ))
            .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                payout_id,
                instructor_id,
                instructor_name,
                enrollment_id,
                payment_id,
                amount_cents,
                earned_on,
                matures_on,
                paid_out,
            )| PayoutData {
                payout_id,
                instructor_id,
                instructor_name,
                enrollment_id,
                payment_id,
                amount_cents,
                earned_on,
                matures_on,
                paid_out: paid_out != 0,
            },
        )
        .collect())
}

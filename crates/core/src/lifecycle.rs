// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk administrative mutations: wipe, demo seed and scenario generation.
//!
//! None of these run in a transaction. Each step is awaited before the next
//! starts, a failing step stops the run, and whatever already succeeded
//! stays in place. Failures report the steps that completed so an operator
//! can see how far the run got.
//!
//! Deletes walk [`WIPE_ORDER`] (children first). Inserts create every parent
//! before the rows that reference it.

use crate::error::CoreError;
use crate::invalidation::{ViewInvalidator, ViewScope};
use crate::overrides::OverrideStore;
use crate::resolver::EffectiveDateResolver;
use crate::store::{StoreClient, StoreError};
use std::sync::Arc;
use stepline_domain::{
    BusinessTable, DEMO_CLASSES, DEMO_ENROLLMENTS, DEMO_EXPENSES, DEMO_INSTRUCTORS, DEMO_MEMBERS,
    DEMO_RATES, DomainError, EffectiveDate, EnrollmentStatus, LedgerKind, MemberStatus, NewClass,
    NewEnrollment, NewEnrollmentLog, NewInstructor, NewLedgerEntry, NewMember, NewPayment,
    NewPayout, NewRate, NewRecord, RecordLookup, SCENARIO_CLASS_NAME, SCENARIO_INSTRUCTOR_NAME,
    SCENARIO_INSTRUCTOR_SHARE_PERCENT, SCENARIO_MONTHLY_FEE_CENTS, SCENARIO_RATE_NAME,
    ScenarioKind, ScenarioPlan, SeedPlan, WIPE_ORDER, instructor_share,
};
use time::PrimitiveDateTime;
use tracing::{debug, error, info, warn};

/// Rows removed per table by a completed wipe, in deletion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WipeReport {
    pub deleted: Vec<(BusinessTable, usize)>,
}

impl WipeReport {
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.deleted.iter().map(|(_, rows)| rows).sum()
    }

    fn describe(deleted: &[(BusinessTable, usize)]) -> Vec<String> {
        deleted
            .iter()
            .map(|(table, rows)| format!("deleted {rows} rows from {table}"))
            .collect()
    }
}

/// Rows created per table by a completed demo seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub effective_date: EffectiveDate,
    pub created: Vec<(BusinessTable, usize)>,
}

/// The rows a generated scenario produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub kind: ScenarioKind,
    pub effective_date: EffectiveDate,
    pub member_id: i64,
    pub enrollment_id: i64,
    pub payment_id: i64,
    /// Tables that received new rows, with counts. Reused fixture rows are
    /// not counted.
    pub created: Vec<(BusinessTable, usize)>,
}

/// Tracks the inserts of one seed or scenario run.
struct InsertRun {
    operation: &'static str,
    recorded_at: PrimitiveDateTime,
    created: Vec<(BusinessTable, usize)>,
}

impl InsertRun {
    const fn new(operation: &'static str, recorded_at: PrimitiveDateTime) -> Self {
        Self {
            operation,
            recorded_at,
            created: Vec::new(),
        }
    }

    fn insert(
        &mut self,
        store: &mut dyn StoreClient,
        record: NewRecord,
    ) -> Result<i64, CoreError> {
        let table: BusinessTable = record.table();
        let id: i64 = store
            .insert(&record, self.recorded_at)
            .map_err(|err| self.step_failed(table, err))?;

        match self.created.iter_mut().find(|(t, _)| *t == table) {
            Some((_, count)) => *count += 1,
            None => self.created.push((table, 1)),
        }
        Ok(id)
    }

    fn find_or_insert(
        &mut self,
        store: &mut dyn StoreClient,
        lookup: &RecordLookup,
        record: NewRecord,
    ) -> Result<i64, CoreError> {
        let existing: Option<i64> = store
            .lookup(lookup)
            .map_err(|err| self.step_failed(lookup.table(), err))?;

        if let Some(id) = existing {
            debug!(table = %lookup.table(), id, "Reusing existing fixture row");
            return Ok(id);
        }
        self.insert(store, record)
    }

    fn step_failed(&self, table: BusinessTable, err: StoreError) -> CoreError {
        error!(
            operation = self.operation,
            table = %table,
            error = %err,
            "Insert failed, stopping run"
        );
        CoreError::StepFailed {
            operation: self.operation,
            table,
            message: err.message,
            completed: self.describe(),
        }
    }

    fn describe(&self) -> Vec<String> {
        self.created
            .iter()
            .map(|(table, rows)| format!("created {rows} rows in {table}"))
            .collect()
    }
}

/// Runs the administrative data lifecycle operations.
#[derive(Clone)]
pub struct LifecycleOrchestrator {
    resolver: EffectiveDateResolver,
    invalidator: Arc<dyn ViewInvalidator>,
}

impl LifecycleOrchestrator {
    #[must_use]
    pub fn new(resolver: EffectiveDateResolver, invalidator: Arc<dyn ViewInvalidator>) -> Self {
        Self {
            resolver,
            invalidator,
        }
    }

    /// Deletes every business row, children before parents.
    ///
    /// Operator and session tables are not touched.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StepFailed` naming the first table whose delete
    /// was rejected. Tables emptied before it stay empty.
    pub fn wipe_all_business_data(
        &self,
        store: &mut dyn StoreClient,
    ) -> Result<WipeReport, CoreError> {
        info!("Wiping all business data");
        let mut deleted: Vec<(BusinessTable, usize)> = Vec::with_capacity(WIPE_ORDER.len());

        for table in WIPE_ORDER {
            match store.delete_all(table) {
                Ok(rows) => {
                    debug!(table = %table, rows, "Deleted rows");
                    deleted.push((table, rows));
                }
                Err(err) => {
                    error!(
                        table = %table,
                        error = %err,
                        completed = deleted.len(),
                        "Wipe step failed, stopping"
                    );
                    if !deleted.is_empty() {
                        self.invalidator.invalidate(ViewScope::Listings);
                    }
                    return Err(CoreError::StepFailed {
                        operation: "wipe",
                        table,
                        message: err.message,
                        completed: WipeReport::describe(&deleted),
                    });
                }
            }
        }

        let report: WipeReport = WipeReport { deleted };
        info!(rows = report.total_rows(), "Business data wiped");
        self.invalidator.invalidate(ViewScope::Listings);
        Ok(report)
    }

    /// Creates a small demo studio dated around the effective date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the demo studio cannot be dated
    /// from the effective date, before anything is written. Returns
    /// `CoreError::StepFailed` on the first rejected insert. Rows created
    /// before it remain.
    pub fn seed_demo_data(
        &self,
        store: &mut dyn StoreClient,
        overrides: &dyn OverrideStore,
    ) -> Result<SeedReport, CoreError> {
        let today: EffectiveDate = self.resolver.effective_today(overrides);
        let plan: SeedPlan = SeedPlan::build(today).map_err(|err| {
            warn!(effective_date = %today, error = %err, "Demo data cannot be dated");
            CoreError::from(err)
        })?;
        info!(effective_date = %today, "Seeding demo data");

        let mut run: InsertRun = InsertRun::new("seed", self.resolver.effective_now(overrides));
        let result: Result<(), CoreError> = Self::seed_into(&mut run, store, &plan);
        if !run.created.is_empty() {
            self.invalidator.invalidate(ViewScope::Listings);
        }
        result?;

        info!(effective_date = %today, tables = run.created.len(), "Demo data seeded");
        Ok(SeedReport {
            effective_date: today,
            created: run.created,
        })
    }

    fn seed_into(
        run: &mut InsertRun,
        store: &mut dyn StoreClient,
        plan: &SeedPlan,
    ) -> Result<(), CoreError> {
        let mut instructor_ids: Vec<i64> = Vec::with_capacity(DEMO_INSTRUCTORS.len());
        for instructor in DEMO_INSTRUCTORS {
            instructor_ids.push(run.insert(
                store,
                NewRecord::Instructor(NewInstructor {
                    name: instructor.name.to_string(),
                    email: Some(instructor.email.to_string()),
                }),
            )?);
        }

        let mut rate_ids: Vec<i64> = Vec::with_capacity(DEMO_RATES.len());
        for rate in DEMO_RATES {
            rate_ids.push(run.insert(
                store,
                NewRecord::Rate(NewRate {
                    name: rate.name.to_string(),
                    monthly_fee_cents: rate.monthly_fee_cents,
                    instructor_share_percent: rate.instructor_share_percent,
                }),
            )?);
        }

        let mut class_ids: Vec<i64> = Vec::with_capacity(DEMO_CLASSES.len());
        for class in DEMO_CLASSES {
            class_ids.push(run.insert(
                store,
                NewRecord::Class(NewClass {
                    name: class.name.to_string(),
                    instructor_id: instructor_ids[class.instructor],
                    rate_id: rate_ids[class.rate],
                    weekday: class.weekday.to_string(),
                    start_time: class.start_time.to_string(),
                }),
            )?);
        }

        let mut member_ids: Vec<i64> = Vec::with_capacity(DEMO_MEMBERS.len());
        for (member, dates) in DEMO_MEMBERS.iter().zip(&plan.members) {
            member_ids.push(run.insert(
                store,
                NewRecord::Member(NewMember {
                    full_name: member.full_name.to_string(),
                    phone: Some(member.phone.to_string()),
                    status: member.status,
                    freeze_start_date: dates.freeze_start_date,
                    freeze_end_date: dates.freeze_end_date,
                    joined_on: dates.joined_on,
                }),
            )?);
        }

        for (enrollment, dates) in DEMO_ENROLLMENTS.iter().zip(&plan.enrollments) {
            let class = &DEMO_CLASSES[enrollment.class];
            let rate = &DEMO_RATES[class.rate];
            let member = &DEMO_MEMBERS[enrollment.member];

            let enrollment_id: i64 = run.insert(
                store,
                NewRecord::Enrollment(NewEnrollment {
                    member_id: member_ids[enrollment.member],
                    class_id: class_ids[enrollment.class],
                    start_date: dates.start,
                    next_due_date: dates.next_due_date,
                    status: if member.status == MemberStatus::Frozen {
                        EnrollmentStatus::Frozen
                    } else {
                        EnrollmentStatus::Active
                    },
                }),
            )?;

            run.insert(
                store,
                NewRecord::EnrollmentLog(NewEnrollmentLog {
                    enrollment_id,
                    event: format!("enrolled in {}", class.name),
                    event_date: dates.start,
                }),
            )?;

            for period in &dates.periods {
                let payment_id: i64 = run.insert(
                    store,
                    NewRecord::Payment(NewPayment {
                        enrollment_id,
                        amount_cents: rate.monthly_fee_cents,
                        paid_on: period.start,
                        period_start: period.start,
                        period_end: period.end,
                    }),
                )?;
                run.insert(
                    store,
                    NewRecord::LedgerEntry(NewLedgerEntry {
                        enrollment_id: Some(enrollment_id),
                        kind: LedgerKind::Income,
                        amount_cents: rate.monthly_fee_cents,
                        entry_date: period.start,
                        description: format!("{} - {}", member.full_name, class.name),
                    }),
                )?;
                run.insert(
                    store,
                    NewRecord::Payout(NewPayout {
                        instructor_id: instructor_ids[class.instructor],
                        enrollment_id,
                        payment_id,
                        amount_cents: instructor_share(
                            rate.monthly_fee_cents,
                            rate.instructor_share_percent,
                        ),
                        earned_on: period.start,
                        matures_on: period.payout_matures_on,
                    }),
                )?;
            }
        }

        for (expense, entry_date) in DEMO_EXPENSES.iter().zip(&plan.expense_dates) {
            run.insert(
                store,
                NewRecord::LedgerEntry(NewLedgerEntry {
                    enrollment_id: None,
                    kind: LedgerKind::Expense,
                    amount_cents: expense.amount_cents,
                    entry_date: *entry_date,
                    description: expense.description.to_string(),
                }),
            )?;
        }

        Ok(())
    }

    /// Generates the named scenario on the effective date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an unknown kind, before anything
    /// is written. Returns `CoreError::StepFailed` on the first rejected
    /// store call.
    pub fn generate_scenario(
        &self,
        store: &mut dyn StoreClient,
        overrides: &dyn OverrideStore,
        kind: &str,
    ) -> Result<ScenarioReport, CoreError> {
        let kind: ScenarioKind = kind.parse().map_err(|err: DomainError| {
            warn!(requested = kind, "Rejected unknown scenario kind");
            CoreError::from(err)
        })?;

        let today: EffectiveDate = self.resolver.effective_today(overrides);
        let plan: ScenarioPlan = kind.plan(today)?;
        info!(kind = %kind, effective_date = %today, "Generating scenario");

        let mut run: InsertRun =
            InsertRun::new("scenario", self.resolver.effective_now(overrides));
        let result: Result<(i64, i64, i64), CoreError> = Self::scenario_into(&mut run, store, &plan);
        if !run.created.is_empty() {
            self.invalidator.invalidate(ViewScope::Listings);
        }
        let (member_id, enrollment_id, payment_id) = result?;

        info!(kind = %kind, member_id, enrollment_id, "Scenario generated");
        Ok(ScenarioReport {
            kind,
            effective_date: today,
            member_id,
            enrollment_id,
            payment_id,
            created: run.created,
        })
    }

    fn scenario_into(
        run: &mut InsertRun,
        store: &mut dyn StoreClient,
        plan: &ScenarioPlan,
    ) -> Result<(i64, i64, i64), CoreError> {
        let instructor_id: i64 = run.find_or_insert(
            store,
            &RecordLookup::InstructorByName(SCENARIO_INSTRUCTOR_NAME.to_string()),
            NewRecord::Instructor(NewInstructor {
                name: SCENARIO_INSTRUCTOR_NAME.to_string(),
                email: None,
            }),
        )?;
        let rate_id: i64 = run.find_or_insert(
            store,
            &RecordLookup::RateByName(SCENARIO_RATE_NAME.to_string()),
            NewRecord::Rate(NewRate {
                name: SCENARIO_RATE_NAME.to_string(),
                monthly_fee_cents: SCENARIO_MONTHLY_FEE_CENTS,
                instructor_share_percent: SCENARIO_INSTRUCTOR_SHARE_PERCENT,
            }),
        )?;
        let class_id: i64 = run.find_or_insert(
            store,
            &RecordLookup::ClassByName(SCENARIO_CLASS_NAME.to_string()),
            NewRecord::Class(NewClass {
                name: SCENARIO_CLASS_NAME.to_string(),
                instructor_id,
                rate_id,
                weekday: String::from("Friday"),
                start_time: String::from("20:00"),
            }),
        )?;

        let member_id: i64 = run.insert(
            store,
            NewRecord::Member(NewMember {
                full_name: plan.member_name.clone(),
                phone: None,
                status: plan.member_status,
                freeze_start_date: Some(plan.freeze.start),
                freeze_end_date: plan.freeze.end,
                joined_on: plan.enrollment_start,
            }),
        )?;
        let enrollment_id: i64 = run.insert(
            store,
            NewRecord::Enrollment(NewEnrollment {
                member_id,
                class_id,
                start_date: plan.enrollment_start,
                next_due_date: plan.next_due_date,
                status: plan.enrollment_status,
            }),
        )?;
        let payment_id: i64 = run.insert(
            store,
            NewRecord::Payment(NewPayment {
                enrollment_id,
                amount_cents: SCENARIO_MONTHLY_FEE_CENTS,
                paid_on: plan.paid_period_start,
                period_start: plan.paid_period_start,
                period_end: plan.paid_period_end,
            }),
        )?;
        run.insert(
            store,
            NewRecord::EnrollmentLog(NewEnrollmentLog {
                enrollment_id,
                event: format!("scenario {} generated", plan.kind),
                event_date: plan.enrollment_start,
            }),
        )?;

        Ok((member_id, enrollment_id, payment_id))
    }

    /// Row counts of every business table, in wipe order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persistence` if any count fails.
    pub fn table_counts(
        store: &mut dyn StoreClient,
    ) -> Result<Vec<(BusinessTable, usize)>, CoreError> {
        WIPE_ORDER
            .iter()
            .map(|table| {
                store
                    .count(*table)
                    .map(|rows| (*table, rows))
                    .map_err(|err| CoreError::Persistence(err.message))
            })
            .collect()
    }
}

impl std::fmt::Debug for LifecycleOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleOrchestrator")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

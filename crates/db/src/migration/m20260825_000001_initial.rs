//! Initial database migration.
//!
//! Creates the disbursements table with its status invariants, the
//! collaborator-owned snapshot tables, and the guard triggers that
//! back the lifecycle rules at the storage layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: DISBURSEMENTS
        // ============================================================
        db.execute_unprepared(DISBURSEMENTS_SQL).await?;

        // ============================================================
        // PART 3: COLLABORATOR SNAPSHOT TABLES
        // ============================================================
        db.execute_unprepared(POOL_TOTALS_SQL).await?;
        db.execute_unprepared(DIRECTORY_ENTRIES_SQL).await?;
        db.execute_unprepared(ACTOR_ROLES_SQL).await?;

        // ============================================================
        // PART 4: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Disbursement lifecycle status
CREATE TYPE disbursement_status AS ENUM (
    'draft',
    'submitted',
    'approved',
    'rejected',
    'paid'
);

-- Coarse disbursement type
CREATE TYPE disbursement_type AS ENUM (
    'campaign',
    'zakat',
    'qurban',
    'operational',
    'vendor',
    'revenue_share'
);

-- Fine-grained category; drives pool derivation and recipient shape
CREATE TYPE disbursement_category AS ENUM (
    'campaign_to_beneficiary',
    'zakat_to_mustahiq',
    'qurban_purchase_sapi',
    'qurban_purchase_kambing',
    'qurban_execution_fee',
    'operational_expense',
    'vendor_payment',
    'revenue_share_mitra',
    'revenue_share_fundraiser',
    'revenue_share_developer'
);

-- Recipient kind
CREATE TYPE recipient_kind AS ENUM (
    'employee',
    'mustahiq',
    'vendor',
    'fundraiser',
    'mitra',
    'manual'
);

-- Application roles
CREATE TYPE app_role AS ENUM (
    'mitra',
    'employee',
    'program_coordinator',
    'admin_campaign',
    'admin_finance',
    'super_admin'
);
";

const DISBURSEMENTS_SQL: &str = r"
CREATE TABLE disbursements (
    id UUID PRIMARY KEY,
    disbursement_number VARCHAR(30) NOT NULL UNIQUE,
    disbursement_type disbursement_type NOT NULL,
    category disbursement_category NOT NULL,
    pool_key TEXT,
    amount NUMERIC(19, 0) NOT NULL,
    description TEXT,
    reference_id UUID,
    recipient_kind recipient_kind NOT NULL,
    recipient_directory_id UUID,
    recipient_name TEXT NOT NULL,
    recipient_contact TEXT,
    recipient_bank_name TEXT,
    recipient_bank_account TEXT,
    recipient_bank_account_name TEXT,
    recipient_asnaf TEXT,
    status disbursement_status NOT NULL DEFAULT 'draft',
    created_by UUID NOT NULL,
    submitted_at TIMESTAMPTZ,
    submitted_by UUID,
    approved_at TIMESTAMPTZ,
    approved_by UUID,
    rejection_reason TEXT,
    disbursed_at TIMESTAMPTZ,
    disbursed_by UUID,
    transferred_amount NUMERIC(19, 0),
    additional_fees NUMERIC(19, 0),
    transfer_date DATE,
    transfer_proof_url TEXT,
    destination_bank_id UUID,
    resubmitted_from UUID REFERENCES disbursements(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_rejection_reason CHECK (
        (status = 'rejected') = (rejection_reason IS NOT NULL AND btrim(rejection_reason) <> '')
    ),
    CONSTRAINT chk_payment_fields CHECK (
        (status = 'paid'
            AND transferred_amount IS NOT NULL
            AND additional_fees IS NOT NULL
            AND transfer_date IS NOT NULL
            AND transfer_proof_url IS NOT NULL
            AND destination_bank_id IS NOT NULL
            AND disbursed_at IS NOT NULL
            AND disbursed_by IS NOT NULL)
        OR
        (status <> 'paid'
            AND transferred_amount IS NULL
            AND additional_fees IS NULL
            AND transfer_date IS NULL
            AND transfer_proof_url IS NULL
            AND destination_bank_id IS NULL
            AND disbursed_at IS NULL
            AND disbursed_by IS NULL)
    ),
    CONSTRAINT chk_transferred_positive CHECK (
        transferred_amount IS NULL OR transferred_amount > 0
    ),
    CONSTRAINT chk_fees_non_negative CHECK (
        additional_fees IS NULL OR additional_fees >= 0
    )
);

-- Partial index covering exactly the committed-sum query
CREATE INDEX idx_disb_pool_committed ON disbursements(pool_key)
    WHERE pool_key IS NOT NULL AND status IN ('submitted', 'approved', 'paid');
CREATE INDEX idx_disb_status ON disbursements(status, created_at);
CREATE INDEX idx_disb_created_by ON disbursements(created_by);
CREATE INDEX idx_disb_reference ON disbursements(reference_id) WHERE reference_id IS NOT NULL;
CREATE INDEX idx_disb_resubmitted_from ON disbursements(resubmitted_from)
    WHERE resubmitted_from IS NOT NULL;
";

const POOL_TOTALS_SQL: &str = r"
-- Collected/entitled funds per pool. Owned by the campaign, zakat,
-- qurban, and revenue-share services; this engine only reads.
CREATE TABLE pool_totals (
    pool_key TEXT PRIMARY KEY,
    collected NUMERIC(19, 0) NOT NULL DEFAULT 0,
    external_paid NUMERIC(19, 0) NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_collected_non_negative CHECK (collected >= 0),
    CONSTRAINT chk_external_paid_non_negative CHECK (external_paid >= 0)
);
";

const DIRECTORY_ENTRIES_SQL: &str = r"
-- Mirror of the employee/mustahiq/vendor/fundraiser/mitra directories.
-- Owned by the directory services; this engine only reads.
CREATE TABLE directory_entries (
    id UUID NOT NULL,
    kind recipient_kind NOT NULL,
    name TEXT NOT NULL,
    contact TEXT,
    bank_name TEXT,
    bank_account TEXT,
    bank_account_name TEXT,
    asnaf TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (id, kind),
    CONSTRAINT chk_directory_kind CHECK (kind <> 'manual')
);
";

const ACTOR_ROLES_SQL: &str = r"
-- Mirror of the authentication service's role grants.
-- Owned by the auth service; this engine only reads.
CREATE TABLE actor_roles (
    actor_id UUID NOT NULL,
    role app_role NOT NULL,
    granted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (actor_id, role)
);

CREATE INDEX idx_actor_roles_actor ON actor_roles(actor_id);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: prevent_terminal_modification
-- Paid and rejected disbursements are immutable; id and number
-- never change on any row
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_terminal_modification()
RETURNS TRIGGER AS $$
BEGIN
    IF OLD.status = 'paid' THEN
        RAISE EXCEPTION 'Cannot modify paid disbursement.';
    END IF;

    IF OLD.status = 'rejected' THEN
        RAISE EXCEPTION 'Cannot modify rejected disbursement. Re-submit as a new disbursement instead.';
    END IF;

    IF NEW.id <> OLD.id OR NEW.disbursement_number <> OLD.disbursement_number THEN
        RAISE EXCEPTION 'Disbursement id and number are immutable.';
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_terminal_mod
BEFORE UPDATE ON disbursements
FOR EACH ROW
EXECUTE FUNCTION prevent_terminal_modification();

-- ============================================================
-- FUNCTION: guard_disbursement_delete
-- Hard delete is allowed only from draft, submitted, or rejected
-- ============================================================
CREATE OR REPLACE FUNCTION guard_disbursement_delete()
RETURNS TRIGGER AS $$
BEGIN
    IF OLD.status NOT IN ('draft', 'submitted', 'rejected') THEN
        RAISE EXCEPTION 'Cannot delete % disbursement.', OLD.status;
    END IF;
    RETURN OLD;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_guard_disb_delete
BEFORE DELETE ON disbursements
FOR EACH ROW
EXECUTE FUNCTION guard_disbursement_delete();
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- ============================================================

-- Drop triggers
DROP TRIGGER IF EXISTS trg_guard_disb_delete ON disbursements;
DROP TRIGGER IF EXISTS trg_prevent_terminal_mod ON disbursements;

-- Drop functions
DROP FUNCTION IF EXISTS guard_disbursement_delete();
DROP FUNCTION IF EXISTS prevent_terminal_modification();

-- Drop tables
DROP TABLE IF EXISTS actor_roles CASCADE;
DROP TABLE IF EXISTS directory_entries CASCADE;
DROP TABLE IF EXISTS pool_totals CASCADE;
DROP TABLE IF EXISTS disbursements CASCADE;

-- Drop enums
DROP TYPE IF EXISTS app_role CASCADE;
DROP TYPE IF EXISTS recipient_kind CASCADE;
DROP TYPE IF EXISTS disbursement_category CASCADE;
DROP TYPE IF EXISTS disbursement_type CASCADE;
DROP TYPE IF EXISTS disbursement_status CASCADE;
";

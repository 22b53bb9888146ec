//! Scheduled maintenance for SIM Clinic.
//!
//! The auth core never purges dead revocation entries itself; the
//! [`RevocationPurgeScheduler`] runs that purge on a cron schedule.

pub mod scheduler;

pub use scheduler::RevocationPurgeScheduler;

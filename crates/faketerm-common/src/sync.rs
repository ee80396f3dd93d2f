use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use tracing::warn;

static POISON_RECOVERIES: AtomicU64 = AtomicU64::new(0);

/// Locks `lock`, taking the guard back out of a poisoned mutex.
///
/// A stream handle left behind by a panicking reader or writer is still a
/// usable handle, so the poison flag is logged and otherwise ignored.
pub fn mutex_lock_or_recover<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        POISON_RECOVERIES.fetch_add(1, Ordering::Relaxed);
        warn!("recovering from poisoned mutex");
        poisoned.into_inner()
    })
}

/// Number of poisoned locks recovered by this process so far.
pub fn poison_recovery_count() -> u64 {
    POISON_RECOVERIES.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_unpoisoned() {
        let lock = Mutex::new(5);
        *mutex_lock_or_recover(&lock) += 1;
        assert_eq!(*mutex_lock_or_recover(&lock), 6);
    }

    #[test]
    fn test_lock_recovers_after_panic() {
        let lock = Arc::new(Mutex::new(vec![1u8]));
        let poisoner = Arc::clone(&lock);
        let result = thread::spawn(move || {
            let mut guard = poisoner.lock().unwrap();
            guard.push(2);
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());
        assert!(lock.is_poisoned());

        let before = poison_recovery_count();
        let guard = mutex_lock_or_recover(&lock);
        assert_eq!(*guard, vec![1, 2]);
        assert!(poison_recovery_count() > before);
    }
}

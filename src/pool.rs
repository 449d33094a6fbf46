// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

/// A pool of reusable per-match scratch values.
///
/// A compiled pattern is immutable and shared freely across threads; the
/// matching engines, however, need mutable scratch (thread sets, a
/// visited bitmap). Each engine checks a value out of the pattern's pool
/// at the start of a match and returns it on drop, so the steady state
/// allocates nothing and the lock is only held for the checkout itself.
pub struct Pool<T> {
    create: Box<dyn Fn() -> T + Send + Sync>,
    stack: Mutex<Vec<T>>,
}

impl<T> Pool<T> {
    /// Create a pool that manufactures new values with `create` when
    /// none are available.
    pub fn new(create: Box<dyn Fn() -> T + Send + Sync>) -> Pool<T> {
        Pool { create, stack: Mutex::new(vec![]) }
    }

    /// Check a value out of the pool, creating one if necessary.
    pub fn get(&self) -> PoolGuard<'_, T> {
        let popped = self.stack.lock().expect("pool lock poisoned").pop();
        let value = popped.unwrap_or_else(|| (self.create)());
        PoolGuard { pool: self, value: Some(value) }
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let size = self.stack.lock().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("Pool").field("pooled", &size).finish()
    }
}

/// A checked-out pool value. Returns to the pool on drop.
#[derive(Debug)]
pub struct PoolGuard<'a, T> {
    pool: &'a Pool<T>,
    value: Option<T>,
}

impl<'a, T> Deref for PoolGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_ref().expect("pool guard already returned")
    }
}

impl<'a, T> DerefMut for PoolGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().expect("pool guard already returned")
    }
}

impl<'a, T> Drop for PoolGuard<'a, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            if let Ok(mut stack) = self.pool.stack.lock() {
                stack.push(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pool;

    #[test]
    fn values_are_reused() {
        let pool: Pool<Vec<u32>> = Pool::new(Box::new(Vec::new));
        {
            let mut v = pool.get();
            v.push(42);
        }
        // The same vector comes back, contents intact.
        let v = pool.get();
        assert_eq!(*v, vec![42]);
    }

    #[test]
    fn concurrent_checkouts_are_distinct() {
        let pool: Pool<Vec<u32>> = Pool::new(Box::new(Vec::new));
        let mut a = pool.get();
        let mut b = pool.get();
        a.push(1);
        b.push(2);
        assert_ne!(*a, *b);
    }
}

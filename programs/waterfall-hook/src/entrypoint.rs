//! WASM exports and the host adapter over the hook ABI imports.

use core::{
    alloc::{GlobalAlloc, Layout},
    cell::{Cell, UnsafeCell},
    ptr,
};

use crate::{
    constants::{ACCOUNT_ID_SIZE, GUARD_ENTRY, HASH_SIZE, ISSUED_AMOUNT_SIZE},
    errors::HostError,
    host::Host,
    state::AccountId,
};

// Largest parameter or state value the host stores
const MAX_VALUE_SIZE: usize = 256;

// One invocation never frees; the instance is dropped when the hook returns
const HEAP_SIZE: usize = 16 * 1024;

/// Bump allocator with no loops, so the guard checker accepts it
struct BumpAllocator {
    heap: UnsafeCell<[u8; HEAP_SIZE]>,
    next: Cell<usize>,
}

// Hook instances are single-threaded
unsafe impl Sync for BumpAllocator {}

unsafe impl GlobalAlloc for BumpAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let base = self.heap.get() as usize;
        let start = (base + self.next.get() + layout.align() - 1) & !(layout.align() - 1);
        let end = start + layout.size();
        if end > base + HEAP_SIZE {
            return ptr::null_mut();
        }
        self.next.set(end - base);
        start as *mut u8
    }

    unsafe fn dealloc(&self, _ptr: *mut u8, _layout: Layout) {}
}

#[global_allocator]
static ALLOCATOR: BumpAllocator = BumpAllocator {
    heap: UnsafeCell::new([0; HEAP_SIZE]),
    next: Cell::new(0),
};

#[link(wasm_import_module = "env")]
extern "C" {
    fn _g(id: u32, maxiter: u32) -> i32;
    fn accept(read_ptr: u32, read_len: u32, error_code: i64) -> i64;
    fn rollback(read_ptr: u32, read_len: u32, error_code: i64) -> i64;
    fn otxn_type() -> i64;
    fn otxn_field(write_ptr: u32, write_len: u32, field_id: u32) -> i64;
    fn hook_param(write_ptr: u32, write_len: u32, read_ptr: u32, read_len: u32) -> i64;
    fn hook_account(write_ptr: u32, write_len: u32) -> i64;
    fn state(write_ptr: u32, write_len: u32, kread_ptr: u32, kread_len: u32) -> i64;
    fn state_set(read_ptr: u32, read_len: u32, kread_ptr: u32, kread_len: u32) -> i64;
    fn etxn_reserve(count: u32) -> i64;
    fn emit(write_ptr: u32, write_len: u32, read_ptr: u32, read_len: u32) -> i64;
}

/// Host backed by the runtime's imported functions
struct WasmHost;

fn read_into(buf: &mut [u8], call: impl FnOnce(u32, u32) -> i64) -> Result<Vec<u8>, HostError> {
    let len = HostError::check(call(buf.as_mut_ptr() as u32, buf.len() as u32))? as usize;
    Ok(buf[..len.min(buf.len())].to_vec())
}

impl Host for WasmHost {
    fn guard(&self, id: u32, max_iterations: u32) {
        unsafe { _g(id, max_iterations) };
    }

    fn otxn_type(&self) -> u16 {
        // Negative means no originating transaction; never a payment
        u16::try_from(unsafe { otxn_type() }).unwrap_or(u16::MAX)
    }

    fn otxn_field(&self, field_id: u32) -> Result<Vec<u8>, HostError> {
        let mut buf = [0u8; ISSUED_AMOUNT_SIZE];
        read_into(&mut buf, |ptr, len| unsafe { otxn_field(ptr, len, field_id) })
    }

    fn hook_param(&self, name: &[u8]) -> Result<Vec<u8>, HostError> {
        let mut buf = [0u8; MAX_VALUE_SIZE];
        read_into(&mut buf, |ptr, len| unsafe {
            hook_param(ptr, len, name.as_ptr() as u32, name.len() as u32)
        })
    }

    fn hook_account(&self) -> Result<AccountId, HostError> {
        let mut buf = [0u8; ACCOUNT_ID_SIZE];
        HostError::check(unsafe { hook_account(buf.as_mut_ptr() as u32, buf.len() as u32) })?;
        Ok(AccountId(buf))
    }

    fn state(&self, key: &[u8]) -> Result<Vec<u8>, HostError> {
        let mut buf = [0u8; MAX_VALUE_SIZE];
        read_into(&mut buf, |ptr, len| unsafe {
            state(ptr, len, key.as_ptr() as u32, key.len() as u32)
        })
    }

    fn state_set(&mut self, key: &[u8], value: &[u8]) -> Result<(), HostError> {
        HostError::check(unsafe {
            state_set(
                value.as_ptr() as u32,
                value.len() as u32,
                key.as_ptr() as u32,
                key.len() as u32,
            )
        })?;
        Ok(())
    }

    fn etxn_reserve(&mut self, count: u32) -> Result<(), HostError> {
        HostError::check(unsafe { etxn_reserve(count) })?;
        Ok(())
    }

    fn emit(&mut self, tx: &[u8]) -> Result<[u8; HASH_SIZE], HostError> {
        let mut hash = [0u8; HASH_SIZE];
        HostError::check(unsafe {
            emit(
                hash.as_mut_ptr() as u32,
                hash.len() as u32,
                tx.as_ptr() as u32,
                tx.len() as u32,
            )
        })?;
        Ok(hash)
    }
}

#[no_mangle]
pub extern "C" fn hook(_reserved: u32) -> i64 {
    let mut host = WasmHost;
    let (guard_id, max_iterations) = GUARD_ENTRY;
    host.guard(guard_id, max_iterations);

    let outcome = crate::process_transaction(&mut host);
    let message = outcome.verdict.message().as_bytes();
    let (ptr, len, code) = (message.as_ptr() as u32, message.len() as u32, outcome.verdict.code());

    unsafe {
        if outcome.verdict.is_accept() {
            accept(ptr, len, code)
        } else {
            rollback(ptr, len, code)
        }
    }
}

#[no_mangle]
pub extern "C" fn cbak(_reserved: u32) -> i64 {
    0
}

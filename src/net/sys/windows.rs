#![cfg(windows)]

use windows_sys::Win32::Networking::WinSock;

pub(crate) const AF_INET: i32 = WinSock::AF_INET as i32;
pub(crate) const AF_INET6: i32 = WinSock::AF_INET6 as i32;

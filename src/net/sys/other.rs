// No system headers to consult; use the values most socket layers share.
pub(crate) const AF_INET: i32 = 2;
pub(crate) const AF_INET6: i32 = 10;

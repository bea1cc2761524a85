#[cfg(feature = "debug")]
macro_rules! debug_log {
  ($format:expr, $($values:expr),+$(,)?) => { {
    let bt = backtrace::Backtrace::new();
    log::trace!($format, $($values),+);
    log::trace!("{:?}", bt);
  } };
  ($format:expr) => { {
    let bt = backtrace::Backtrace::new();
    log::trace!($format);
    log::trace!("{:?}", bt);
  } };
}

#[cfg(not(feature = "debug"))]
macro_rules! debug_log {
  ($format:expr, $($values:expr),+$(,)?) => {{}};
  ($format:expr) => {{}};
}

use kernel::KernelError;

/// Maps a driver library error onto the kernel's error kinds, keeping the
/// source error inside the report.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

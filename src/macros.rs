/// Macro to build an [`Invocation`](crate::Invocation) in place.
///
/// ```
/// let du = shcall::invoke!("du", "-sk", "src");
/// assert_eq!(du.get_args().count(), 2);
/// ```
#[macro_export]
macro_rules! invoke {
    ($program:expr $(, $arg:expr )* $(,)?) => {{
        let mut __invocation = $crate::Invocation::new($program);
        $(
            __invocation = __invocation.arg($arg);
        )*
        __invocation
    }};
}

/// Macro to compose a [`Pipeline`](crate::Pipeline) whose stages read the
/// previous output on stdin.
///
/// ```
/// use shcall::{invoke, pipeline};
///
/// let sorted = pipeline!(invoke!("ls") | invoke!("sort", "-r") | invoke!("head", "-n", "1"));
/// assert_eq!(sorted.stage_count(), 3);
/// ```
#[macro_export]
macro_rules! pipeline {
    ($($body:tt)+) => {{
        $crate::__shcall_parse_pipeline!(() $($body)+)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __shcall_parse_pipeline {
    (($($current:tt)*) | $($rest:tt)+) => {{
        $crate::__shcall_pipeline_tail!($crate::Pipeline::new($($current)*), () $($rest)+)
    }};
    (($($current:tt)*)) => {
        $crate::Pipeline::new($($current)*)
    };
    (($($current:tt)*) $token:tt $($rest:tt)*) => {
        $crate::__shcall_parse_pipeline!(($($current)* $token) $($rest)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __shcall_pipeline_tail {
    ($pipe:expr, ($($current:tt)*) | $($rest:tt)+) => {
        $crate::__shcall_pipeline_tail!($pipe.pipe($($current)*), () $($rest)+)
    };
    ($pipe:expr, ($($current:tt)*)) => {
        $pipe.pipe($($current)*)
    };
    ($pipe:expr, ($($current:tt)*) $token:tt $($rest:tt)*) => {
        $crate::__shcall_pipeline_tail!($pipe, ($($current)* $token) $($rest)*)
    };
}

pub use crate::{
    Captured, Error, Feed, Invocation, Invoker, InvokerBuilder, Pipeline, SearchPath, Trim,
    glob_args, glob_args_in, invoke, pipeline,
};

pub use crate::Result;

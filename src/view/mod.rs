pub(crate) mod binding;

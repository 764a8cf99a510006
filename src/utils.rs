/// Render an optional shape, `None` when the shape is not known yet.
pub(crate) fn fmt_shape(shape: Option<&[usize]>) -> String {
    match shape {
        Some(shape) => format!("{shape:?}"),
        None => "None".to_string(),
    }
}

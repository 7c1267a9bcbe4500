use pdf_outline_core::TextBox;

/// Group text boxes into visual rows so multi-line headings merge.
///
/// Boxes are ordered top to bottom (descending `y0`, stable for ties). A new
/// group starts when a box is more than `threshold` away from the box right
/// before it, so a run of closely spaced boxes can drift past `threshold`
/// from the group's first box and still stay in one group.
pub fn group_boxes_by_y(boxes: &[TextBox], threshold: f32) -> Vec<Vec<TextBox>> {
    let mut sorted = boxes.to_vec();
    sorted.sort_by(|a, b| b.y0.total_cmp(&a.y0));

    let mut groups: Vec<Vec<TextBox>> = Vec::new();
    let mut last_y: Option<f32> = None;

    for text_box in sorted {
        let y = text_box.y0;
        let starts_group = last_y.is_none_or(|prev| (y - prev).abs() > threshold);
        if starts_group {
            groups.push(vec![text_box]);
        } else if let Some(current) = groups.last_mut() {
            current.push(text_box);
        }
        last_y = Some(y);
    }

    groups
}

use crate::client::UserView;

const HEADERS: [&str; 6] = ["ID", "NAME", "DOB", "EMAIL", "ROLE", "STATUS"];

/// Renders users as a left-aligned text table.
pub fn render_table(users: &[UserView]) -> String {
  if users.is_empty() {
    return "No users found.\n".to_string();
  }

  let rows: Vec<[String; 6]> = users
    .iter()
    .map(|user| {
      [
        user.id.clone(),
        user.name.clone(),
        user.dob.map(|dob| dob.to_string()).unwrap_or_default(),
        user.email.clone(),
        user.role.clone(),
        user.status.clone(),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(|header| header.chars().count());
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let mut output = String::new();
  push_row(&mut output, &HEADERS.map(String::from), &widths);
  for row in &rows {
    push_row(&mut output, row, &widths);
  }
  output
}

fn push_row(output: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
  let line = cells
    .iter()
    .zip(widths)
    .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
    .collect::<Vec<_>>()
    .join("  ");
  output.push_str(line.trim_end());
  output.push('\n');
}

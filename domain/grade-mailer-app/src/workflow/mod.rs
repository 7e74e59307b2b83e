pub mod send_grades;

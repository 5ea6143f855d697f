//! Server-rendered HTML pages.
//!
//! Markup is assembled by hand; every value that came from the store or the
//! request goes through [`escape`] before it is interpolated.

use axum::response::Html;

use models::{course, student};
use service::{course_service::CourseDetails, student_service::{StudentDetails, StudentForm}};

use crate::metrics;

/// Which half of the site a page belongs to; decides nav and back links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Students,
    Courses,
}

impl Section {
    pub fn home(self) -> &'static str {
        match self {
            Section::Students => "/",
            Section::Courses => "/courses",
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

fn layout(title: &str, body: &str) -> Html<String> {
    metrics::PAGES_RENDERED.inc();
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n\
         <nav><a href=\"/\">Students</a> | <a href=\"/courses\">Courses</a></nav>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    ))
}

pub fn student_list(students: &[student::Model]) -> Html<String> {
    let mut body = String::from("<p><a href=\"/student/create\">Add student</a></p>\n");
    if students.is_empty() {
        body.push_str("<p>No students found.</p>");
        return layout("Students", &body);
    }
    body.push_str("<table>\n<tr><th>#</th><th>Roll number</th><th>First name</th><th>Last name</th><th>Actions</th></tr>\n");
    for (i, s) in students.iter().enumerate() {
        let id = s.student_id;
        body.push_str(&format!(
            "<tr><td>{n}</td><td><a href=\"/student/{id}\">{roll}</a></td><td>{first}</td><td>{last}</td>\
             <td><a href=\"/student/{id}/update\">Update</a> <a href=\"/student/{id}/delete\">Delete</a></td></tr>\n",
            n = i + 1,
            roll = escape(&s.roll_number),
            first = escape(&s.first_name),
            last = opt(&s.last_name),
        ));
    }
    body.push_str("</table>");
    layout("Students", &body)
}

pub fn student_create_form() -> Html<String> {
    let body = "<form method=\"post\" action=\"/student/create\">\n\
        <label>Roll number <input name=\"roll\" required></label><br>\n\
        <label>First name <input name=\"f_name\" required></label><br>\n\
        <label>Last name <input name=\"l_name\"></label><br>\n\
        <button type=\"submit\">Create</button>\n</form>";
    layout("Add student", body)
}

pub fn student_update_form(form: &StudentForm) -> Html<String> {
    let s = &form.student;
    let mut body = format!(
        "<form method=\"post\" action=\"/student/{id}/update\">\n\
         <label>Roll number <input value=\"{roll}\" disabled></label><br>\n\
         <label>First name <input name=\"f_name\" value=\"{first}\" required></label><br>\n\
         <label>Last name <input name=\"l_name\" value=\"{last}\"></label><br>\n\
         <fieldset><legend>Enroll in</legend>\n",
        id = s.student_id,
        roll = escape(&s.roll_number),
        first = escape(&s.first_name),
        last = opt(&s.last_name),
    );
    if form.courses.is_empty() {
        body.push_str("<p>No courses available.</p>\n");
    }
    for c in &form.courses {
        body.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"course\" value=\"{id}\"> {code} {name}</label><br>\n",
            id = c.course_id,
            code = escape(&c.course_code),
            name = escape(&c.course_name),
        ));
    }
    body.push_str("</fieldset>\n<button type=\"submit\">Update</button>\n</form>");
    layout("Update student", &body)
}

pub fn student_details(details: &StudentDetails) -> Html<String> {
    let s = &details.student;
    let mut body = format!(
        "<p>Roll number: {roll}</p>\n<p>Name: {first} {last}</p>\n<h2>Enrolled courses</h2>\n",
        roll = escape(&s.roll_number),
        first = escape(&s.first_name),
        last = opt(&s.last_name),
    );
    if details.courses.is_empty() {
        body.push_str("<p>Not enrolled in any course.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Code</th><th>Name</th><th>Description</th><th></th></tr>\n");
        for c in &details.courses {
            body.push_str(&format!(
                "<tr><td>{code}</td><td>{name}</td><td>{desc}</td>\
                 <td><a href=\"/student/{sid}/withdraw/{cid}\">Withdraw</a></td></tr>\n",
                code = escape(&c.course_code),
                name = escape(&c.course_name),
                desc = opt(&c.course_description),
                sid = s.student_id,
                cid = c.course_id,
            ));
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/\">Back</a></p>");
    layout("Student details", &body)
}

pub fn course_list(courses: &[course::Model]) -> Html<String> {
    let mut body = String::from("<p><a href=\"/course/create\">Add course</a></p>\n");
    if courses.is_empty() {
        body.push_str("<p>No courses found.</p>");
        return layout("Courses", &body);
    }
    body.push_str("<table>\n<tr><th>#</th><th>Code</th><th>Name</th><th>Description</th><th>Actions</th></tr>\n");
    for (i, c) in courses.iter().enumerate() {
        let id = c.course_id;
        body.push_str(&format!(
            "<tr><td>{n}</td><td><a href=\"/course/{id}\">{code}</a></td><td>{name}</td><td>{desc}</td>\
             <td><a href=\"/course/{id}/update\">Update</a> <a href=\"/course/{id}/delete\">Delete</a></td></tr>\n",
            n = i + 1,
            code = escape(&c.course_code),
            name = escape(&c.course_name),
            desc = opt(&c.course_description),
        ));
    }
    body.push_str("</table>");
    layout("Courses", &body)
}

pub fn course_create_form() -> Html<String> {
    let body = "<form method=\"post\" action=\"/course/create\">\n\
        <label>Course code <input name=\"code\" required></label><br>\n\
        <label>Course name <input name=\"c_name\" required></label><br>\n\
        <label>Description <input name=\"desc\"></label><br>\n\
        <button type=\"submit\">Create</button>\n</form>";
    layout("Add course", body)
}

pub fn course_update_form(c: &course::Model) -> Html<String> {
    let body = format!(
        "<form method=\"post\" action=\"/course/{id}/update\">\n\
         <label>Course code <input value=\"{code}\" disabled></label><br>\n\
         <label>Course name <input name=\"c_name\" value=\"{name}\" required></label><br>\n\
         <label>Description <input name=\"desc\" value=\"{desc}\"></label><br>\n\
         <button type=\"submit\">Update</button>\n</form>",
        id = c.course_id,
        code = escape(&c.course_code),
        name = escape(&c.course_name),
        desc = opt(&c.course_description),
    );
    layout("Update course", &body)
}

pub fn course_details(details: &CourseDetails) -> Html<String> {
    let c = &details.course;
    let mut body = format!(
        "<p>Code: {code}</p>\n<p>Name: {name}</p>\n<p>Description: {desc}</p>\n<h2>Enrolled students</h2>\n",
        code = escape(&c.course_code),
        name = escape(&c.course_name),
        desc = opt(&c.course_description),
    );
    if details.students.is_empty() {
        body.push_str("<p>No students enrolled.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Roll number</th><th>First name</th><th>Last name</th></tr>\n");
        for s in &details.students {
            body.push_str(&format!(
                "<tr><td><a href=\"/student/{id}\">{roll}</a></td><td>{first}</td><td>{last}</td></tr>\n",
                id = s.student_id,
                roll = escape(&s.roll_number),
                first = escape(&s.first_name),
                last = opt(&s.last_name),
            ));
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/courses\">Back</a></p>");
    layout("Course details", &body)
}

pub fn duplicate(section: Section) -> Html<String> {
    let (what, retry) = match section {
        Section::Students => ("A student with this roll number already exists.", "/student/create"),
        Section::Courses => ("A course with this code already exists.", "/course/create"),
    };
    let body = format!(
        "<p>{what}</p>\n<p><a href=\"{retry}\">Try again</a> | <a href=\"{home}\">Back</a></p>",
        home = section.home(),
    );
    layout("Already exists", &body)
}

pub fn not_found(section: Section, message: &str) -> Html<String> {
    let body = format!(
        "<p>{msg}</p>\n<p><a href=\"{home}\">Back</a></p>",
        msg = escape(message),
        home = section.home(),
    );
    layout("Not found", &body)
}

pub fn failure(section: Section, message: &str) -> Html<String> {
    let body = format!(
        "<p>The change was not saved.</p>\n<pre>{msg}</pre>\n<p><a href=\"{home}\">Back</a></p>",
        msg = escape(message),
        home = section.home(),
    );
    layout("Something went wrong", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn student_list_escapes_and_links() {
        let students = vec![student::Model {
            student_id: 7,
            roll_number: "R<1>".into(),
            first_name: "Ann".into(),
            last_name: None,
        }];
        let Html(page) = student_list(&students);
        assert!(page.contains("R&lt;1&gt;"));
        assert!(page.contains("href=\"/student/7/update\""));
        assert!(page.contains("href=\"/student/7/delete\""));
        assert!(!page.contains("R<1>"));
    }

    #[test]
    fn empty_lists_say_so() {
        let Html(page) = student_list(&[]);
        assert!(page.contains("No students found."));
        let Html(page) = course_list(&[]);
        assert!(page.contains("No courses found."));
    }

    #[test]
    fn update_form_offers_every_course_as_checkbox() {
        let form = StudentForm {
            student: student::Model { student_id: 1, roll_number: "R1".into(), first_name: "Ann".into(), last_name: Some("Lee".into()) },
            courses: vec![
                course::Model { course_id: 3, course_code: "C1".into(), course_name: "Math".into(), course_description: None },
                course::Model { course_id: 4, course_code: "C2".into(), course_name: "Art".into(), course_description: None },
            ],
        };
        let Html(page) = student_update_form(&form);
        assert!(page.contains("name=\"course\" value=\"3\""));
        assert!(page.contains("name=\"course\" value=\"4\""));
        assert!(page.contains("value=\"Lee\""));
    }

    #[test]
    fn duplicate_page_points_back_to_section() {
        let Html(page) = duplicate(Section::Courses);
        assert!(page.contains("href=\"/course/create\""));
        assert!(page.contains("href=\"/courses\""));
    }
}

use crate::domain::cpf;
use crate::domain::person::{NewPerson, UpdatePerson};
use crate::dto::person::PersonResponse;
use crate::pagination::Paginated;
use crate::repository::{PersonListQuery, PersonReader, PersonWriter};
use crate::services::{ServiceError, ServiceResult};

/// Listing parameters accepted by [`list_persons`].
///
/// Range checks on `page`/`per_page` belong to the HTTP layer; the
/// repository still clamps a zero page so the planner is safe on its own.
#[derive(Debug, Clone)]
pub struct ListPersonsParams {
    pub page: usize,
    pub per_page: usize,
    pub filter: Option<String>,
}

fn validate_sex(sex: Option<&str>) -> ServiceResult<()> {
    match sex {
        None | Some("M") | Some("F") | Some("O") => Ok(()),
        Some(other) => Err(ServiceError::Validation(format!(
            "sex must be M, F or O, got {other:?}"
        ))),
    }
}

/// Returns one page of active persons matching the optional filter.
pub fn list_persons<R>(repo: &R, params: ListPersonsParams) -> ServiceResult<Paginated<PersonResponse>>
where
    R: PersonReader + ?Sized,
{
    let mut query = PersonListQuery::new().paginate(params.page, params.per_page);

    let filter = params
        .filter
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = filter {
        query = query.search(term);
    }

    let (total, persons) = repo.list_persons(query)?;
    let items = persons.into_iter().map(Into::into).collect();

    Ok(Paginated::new(items, total, params.page, params.per_page))
}

/// Fetches an active person by identifier.
pub fn get_person<R>(repo: &R, person_id: i32) -> ServiceResult<PersonResponse>
where
    R: PersonReader + ?Sized,
{
    repo.get_person_by_id(person_id)?
        .map(Into::into)
        .ok_or(ServiceError::NotFound)
}

/// Fetches an active person by CPF, accepted in either form.
pub fn get_person_by_cpf<R>(repo: &R, raw_cpf: &str) -> ServiceResult<PersonResponse>
where
    R: PersonReader + ?Sized,
{
    let canonical = cpf::normalize(raw_cpf);
    repo.get_person_by_cpf(&canonical)?
        .map(Into::into)
        .ok_or(ServiceError::NotFound)
}

/// Registers a new person after CPF validation and uniqueness checks.
pub fn create_person<R>(repo: &R, new_person: NewPerson) -> ServiceResult<PersonResponse>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    validate_sex(new_person.sex.as_deref())?;

    if !cpf::is_valid(&new_person.cpf) {
        return Err(ServiceError::Validation("invalid CPF".to_string()));
    }
    if repo.person_exists_by_cpf(&new_person.cpf, None)? {
        return Err(ServiceError::Conflict("CPF already registered".to_string()));
    }

    Ok(repo.create_person(&new_person)?.into())
}

/// Applies a partial update; a CPF change re-validates and re-checks
/// uniqueness excluding the record itself.
pub fn update_person<R>(
    repo: &R,
    person_id: i32,
    updates: UpdatePerson,
) -> ServiceResult<PersonResponse>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    validate_sex(updates.sex.as_deref())?;

    if repo.get_person_by_id(person_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    if let Some(new_cpf) = updates.cpf.as_deref() {
        if !cpf::is_valid(new_cpf) {
            return Err(ServiceError::Validation("invalid CPF".to_string()));
        }
        if repo.person_exists_by_cpf(new_cpf, Some(person_id))? {
            return Err(ServiceError::Conflict("CPF already registered".to_string()));
        }
    }

    Ok(repo.update_person(person_id, &updates)?.into())
}

/// Soft-deletes a person record.
pub fn delete_person<R>(repo: &R, person_id: i32) -> ServiceResult<()>
where
    R: PersonWriter + ?Sized,
{
    repo.delete_person(person_id).map_err(Into::into)
}

/// Checks whether an active record other than `exclude_id` holds this CPF.
pub fn cpf_exists<R>(repo: &R, raw_cpf: &str, exclude_id: Option<i32>) -> ServiceResult<bool>
where
    R: PersonReader + ?Sized,
{
    let canonical = cpf::normalize(raw_cpf);
    repo.person_exists_by_cpf(&canonical, exclude_id)
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::person::Person;
    use crate::repository::mock::MockRepository;

    fn sample_new_person(cpf: &str) -> NewPerson {
        NewPerson::new(
            "Alice".to_string(),
            Some("F".to_string()),
            Some("alice@example.com".to_string()),
            NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            None,
            None,
            cpf.to_string(),
        )
    }

    fn stored_person(id: i32, new_person: &NewPerson) -> Person {
        Person {
            id,
            name: new_person.name.clone(),
            sex: new_person.sex.clone(),
            email: new_person.email.clone(),
            birth_date: new_person.birth_date,
            birthplace: new_person.birthplace.clone(),
            nationality: new_person.nationality.clone(),
            cpf: new_person.cpf.clone(),
            active: true,
            ..Person::default()
        }
    }

    #[test]
    fn create_rejects_invalid_cpf_without_touching_store() {
        let repo = MockRepository::new();

        let result = create_person(&repo, sample_new_person("12345678901"));

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_rejects_duplicate_cpf() {
        let mut repo = MockRepository::new();
        repo.expect_person_exists_by_cpf()
            .withf(|cpf, exclude| cpf == "22442001403" && exclude.is_none())
            .returning(|_, _| Ok(true));

        let result = create_person(&repo, sample_new_person("224.420.014-03"));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn create_stores_canonical_cpf_and_projects_display_form() {
        let mut repo = MockRepository::new();
        repo.expect_person_exists_by_cpf().returning(|_, _| Ok(false));
        repo.expect_create_person()
            .withf(|new_person| new_person.cpf == "22442001403")
            .returning(|new_person| Ok(stored_person(1, new_person)));

        let response = create_person(&repo, sample_new_person("224.420.014-03")).unwrap();

        assert_eq!(response.id, 1);
        assert_eq!(response.cpf, "224.420.014-03");
    }

    #[test]
    fn create_rejects_unknown_sex() {
        let repo = MockRepository::new();
        let mut person = sample_new_person("22442001403");
        person.sex = Some("X".to_string());

        let result = create_person(&repo, person);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn update_allows_keeping_own_cpf() {
        let mut repo = MockRepository::new();
        repo.expect_get_person_by_id()
            .returning(|id| Ok(Some(stored_person(id, &sample_new_person("22442001403")))));
        repo.expect_person_exists_by_cpf()
            .withf(|cpf, exclude| cpf == "22442001403" && *exclude == Some(7))
            .returning(|_, _| Ok(false));
        repo.expect_update_person()
            .returning(|id, _| Ok(stored_person(id, &sample_new_person("22442001403"))));

        let updates = UpdatePerson {
            cpf: Some("22442001403".to_string()),
            ..UpdatePerson::default()
        };

        assert!(update_person(&repo, 7, updates).is_ok());
    }

    #[test]
    fn update_missing_person_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_person_by_id().returning(|_| Ok(None));

        let result = update_person(&repo, 42, UpdatePerson::default());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn list_ignores_blank_filter() {
        let mut repo = MockRepository::new();
        repo.expect_list_persons()
            .withf(|query| query.search.is_none())
            .returning(|_| Ok((0, vec![])));

        let page = list_persons(
            &repo,
            ListPersonsParams {
                page: 1,
                per_page: 10,
                filter: Some("   ".to_string()),
            },
        )
        .unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn exists_check_normalizes_display_form() {
        let mut repo = MockRepository::new();
        repo.expect_person_exists_by_cpf()
            .withf(|cpf, _| cpf == "22442001403")
            .returning(|_, _| Ok(true));

        assert!(cpf_exists(&repo, "224.420.014-03", None).unwrap());
    }
}

//! ASP.NET Core API with Entity Framework Core.
//!
//! The entity maps to the SQL Server table emitted for the same resource:
//! class name and property names are the PascalCase names the T-SQL
//! script uses.

use crate::manifest;
use crate::plan::{FormPlan, PlannedField, ProjectNames};
use crate::text::{cs_str, cs_verbatim, one_line};
use crate::validation::{Constraint, Format, PHONE_PATTERN, constraints, format_check};
use formforge_core::mapping::{csharp_type, tsql_type};
use formforge_core::{Category, FieldKind, GeneratedFile, Language};

fn cs_file(name: String, code: String, dir: String) -> GeneratedFile {
    GeneratedFile::new(name, code, Language::CSharp, Category::Backend).at(dir)
}

fn project_dir(resource: &ProjectNames) -> String {
    format!("backend/{}Api", resource.pascal)
}

fn namespace(resource: &ProjectNames) -> String {
    format!("{}Api", resource.pascal)
}

pub(super) fn emit(plan: &FormPlan, resource: &ProjectNames) -> Vec<GeneratedFile> {
    let dir = project_dir(resource);
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    vec![
        cs_file(format!("{pascal}Controller.cs"), controller(resource), format!("{dir}/Controllers")),
        cs_file(format!("{pascal}.cs"), entity(plan, resource), format!("{dir}/Models")),
        cs_file("ApiResponse.cs".to_string(), api_response(&ns), format!("{dir}/Models")),
        cs_file("PagedResult.cs".to_string(), paged_result(&ns), format!("{dir}/Models")),
        cs_file(format!("{pascal}Dtos.cs"), dtos(plan, resource), format!("{dir}/DTOs")),
        cs_file(format!("I{pascal}Service.cs"), service_interface(resource), format!("{dir}/Services")),
        cs_file(format!("{pascal}Service.cs"), service(plan, resource), format!("{dir}/Services")),
        cs_file("AppDbContext.cs".to_string(), db_context(resource), format!("{dir}/Data")),
        cs_file("Program.cs".to_string(), program(resource), dir.clone()),
        GeneratedFile::new(
            format!("{ns}.csproj"),
            manifest::api_csproj(&ns),
            Language::Xml,
            Category::Backend,
        )
        .at(dir),
    ]
}

/// C# property type, nullable for optional fields.
fn property_type(field: &PlannedField) -> String {
    let base = csharp_type(field.kind);
    if field.required {
        base.to_string()
    } else {
        format!("{base}?")
    }
}

/// `public T Name { get; set; }`, with a non-null initialiser for required strings.
fn property(field: &PlannedField) -> String {
    let ty = property_type(field);
    if ty == "string" {
        format!("public string {} {{ get; set; }} = string.Empty;", field.pascal)
    } else {
        format!("public {ty} {} {{ get; set; }}", field.pascal)
    }
}

/// DTO property; multi-selects travel as lists and are stored joined.
fn dto_property(field: &PlannedField) -> String {
    match (field.kind, field.required) {
        (FieldKind::MultiSelect, true) => format!("public List<string> {} {{ get; set; }} = new();", field.pascal),
        (FieldKind::MultiSelect, false) => format!("public List<string>? {} {{ get; set; }}", field.pascal),
        _ => property(field),
    }
}

/// Entity-to-DTO value of one field.
fn to_dto_value(field: &PlannedField) -> String {
    let name = &field.pascal;
    match (field.kind, field.required) {
        (FieldKind::MultiSelect, true) => format!("SplitValues(entity.{name}) ?? new()"),
        (FieldKind::MultiSelect, false) => format!("SplitValues(entity.{name})"),
        _ => format!("entity.{name}"),
    }
}

/// DTO-to-entity value of one field.
fn to_entity_value(field: &PlannedField) -> String {
    let name = &field.pascal;
    match (field.kind, field.required) {
        (FieldKind::MultiSelect, true) => format!("string.Join(\",\", dto.{name})"),
        (FieldKind::MultiSelect, false) => format!("dto.{name} == null ? null : string.Join(\",\", dto.{name})"),
        _ => format!("dto.{name}"),
    }
}

fn controller(resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);
    let dto = format!("{pascal}Dto");

    let mut code = String::new();
    code.push_str("using Microsoft.AspNetCore.Mvc;\n");
    code.push_str(&format!("using {ns}.DTOs;\n"));
    code.push_str(&format!("using {ns}.Models;\n"));
    code.push_str(&format!("using {ns}.Services;\n\n"));
    code.push_str(&format!("namespace {ns}.Controllers;\n\n"));
    code.push_str("[ApiController]\n");
    code.push_str("[Route(\"api/[controller]\")]\n");
    code.push_str(&format!("public class {pascal}Controller : ControllerBase\n{{\n"));
    code.push_str(&format!("    private readonly I{pascal}Service _service;\n"));
    code.push_str(&format!("    private readonly ILogger<{pascal}Controller> _logger;\n\n"));
    code.push_str(&format!(
        "    public {pascal}Controller(I{pascal}Service service, ILogger<{pascal}Controller> logger)\n"
    ));
    code.push_str("    {\n        _service = service;\n        _logger = logger;\n    }\n\n");

    // GET list
    code.push_str("    [HttpGet]\n");
    code.push_str(&format!(
        "    public async Task<ActionResult<ApiResponse<PagedResult<{dto}>>>> GetAll(\n"
    ));
    code.push_str("        [FromQuery] int pageNumber = 1,\n");
    code.push_str("        [FromQuery] int pageSize = 10)\n");
    code.push_str("    {\n        try\n        {\n");
    code.push_str("            var result = await _service.GetAllAsync(Math.Max(pageNumber, 1), Math.Clamp(pageSize, 1, 100));\n");
    code.push_str(&format!(
        "            return Ok(ApiResponse<PagedResult<{dto}>>.Ok(result));\n"
    ));
    code.push_str(&catch_block(
        &format!("Error listing {pascal} records"),
        None,
        &format!("PagedResult<{dto}>"),
        &format!("Failed to fetch {pascal} records"),
    ));

    // GET by id
    code.push_str("    [HttpGet(\"{id}\")]\n");
    code.push_str(&format!(
        "    public async Task<ActionResult<ApiResponse<{dto}>>> GetById(int id)\n"
    ));
    code.push_str("    {\n        try\n        {\n");
    code.push_str("            var result = await _service.GetByIdAsync(id);\n");
    code.push_str(&not_found(pascal, &dto));
    code.push_str(&format!("            return Ok(ApiResponse<{dto}>.Ok(result));\n"));
    code.push_str(&catch_block(
        &format!("Error getting {pascal} {{Id}}"),
        Some("id"),
        &dto,
        &format!("Failed to fetch {pascal}"),
    ));

    // POST
    code.push_str("    [HttpPost]\n");
    code.push_str(&format!(
        "    public async Task<ActionResult<ApiResponse<{dto}>>> Create([FromBody] Create{dto} dto)\n"
    ));
    code.push_str("    {\n        try\n        {\n");
    code.push_str("            var result = await _service.CreateAsync(dto);\n");
    code.push_str(&format!(
        "            return CreatedAtAction(nameof(GetById), new {{ id = result.Id }}, ApiResponse<{dto}>.Ok(result, \"{pascal} created successfully\"));\n"
    ));
    code.push_str(&catch_block(
        &format!("Error creating {pascal}"),
        None,
        &dto,
        &format!("Failed to create {pascal}"),
    ));

    // PUT
    code.push_str("    [HttpPut(\"{id}\")]\n");
    code.push_str(&format!(
        "    public async Task<ActionResult<ApiResponse<{dto}>>> Update(int id, [FromBody] Update{dto} dto)\n"
    ));
    code.push_str("    {\n        try\n        {\n");
    code.push_str("            var result = await _service.UpdateAsync(id, dto);\n");
    code.push_str(&not_found(pascal, &dto));
    code.push_str(&format!(
        "            return Ok(ApiResponse<{dto}>.Ok(result, \"{pascal} updated successfully\"));\n"
    ));
    code.push_str(&catch_block(
        &format!("Error updating {pascal} {{Id}}"),
        Some("id"),
        &dto,
        &format!("Failed to update {pascal}"),
    ));

    // DELETE
    code.push_str("    [HttpDelete(\"{id}\")]\n");
    code.push_str("    public async Task<ActionResult<ApiResponse<bool>>> Delete(int id)\n");
    code.push_str("    {\n        try\n        {\n");
    code.push_str("            var deleted = await _service.DeleteAsync(id);\n");
    code.push_str("            if (!deleted)\n            {\n");
    code.push_str(&format!(
        "                return NotFound(ApiResponse<bool>.Fail(\"{pascal} not found\"));\n"
    ));
    code.push_str("            }\n");
    code.push_str(&format!(
        "            return Ok(ApiResponse<bool>.Ok(true, \"{pascal} deleted successfully\"));\n"
    ));
    let delete_catch = catch_block(
        &format!("Error deleting {pascal} {{Id}}"),
        Some("id"),
        "bool",
        &format!("Failed to delete {pascal}"),
    );
    code.push_str(delete_catch.trim_end());
    code.push('\n');
    code.push_str("}\n");
    code
}

fn not_found(pascal: &str, dto: &str) -> String {
    format!(
        "            if (result == null)\n            {{\n                return NotFound(ApiResponse<{dto}>.Fail(\"{pascal} not found\"));\n            }}\n"
    )
}

/// Closes the `try` and adds the 500 handler; ends the action.
fn catch_block(log: &str, arg: Option<&str>, payload: &str, failure: &str) -> String {
    let log_args = arg.map(|a| format!(", {a}")).unwrap_or_default();
    let mut code = String::new();
    code.push_str("        }\n");
    code.push_str("        catch (Exception ex)\n        {\n");
    code.push_str(&format!("            _logger.LogError(ex, \"{log}\"{log_args});\n"));
    code.push_str(&format!(
        "            return StatusCode(500, ApiResponse<{payload}>.Fail(\"{failure}\", ex.Message));\n"
    ));
    code.push_str("        }\n");
    code.push_str("    }\n\n");
    code
}

fn entity(plan: &FormPlan, resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    let mut code = String::new();
    code.push_str("using System.ComponentModel.DataAnnotations;\n");
    code.push_str("using System.ComponentModel.DataAnnotations.Schema;\n\n");
    code.push_str(&format!("namespace {ns}.Models;\n\n"));
    code.push_str(&format!("[Table(\"{pascal}\")]\n"));
    code.push_str(&format!("public class {pascal}\n{{\n"));
    code.push_str("    [Key]\n");
    code.push_str("    [DatabaseGenerated(DatabaseGeneratedOption.Identity)]\n");
    code.push_str("    public int Id { get; set; }\n\n");

    for field in &plan.fields {
        if field.required {
            code.push_str("    [Required]\n");
        }
        if tsql_type(field.kind) == "NVARCHAR(255)" {
            code.push_str("    [MaxLength(255)]\n");
        }
        if field.kind == FieldKind::Date {
            code.push_str("    [Column(TypeName = \"date\")]\n");
        }
        code.push_str(&format!("    {}\n\n", property(field)));
    }

    code.push_str("    public DateTime CreatedAt { get; set; } = DateTime.UtcNow;\n\n");
    code.push_str("    public DateTime UpdatedAt { get; set; } = DateTime.UtcNow;\n\n");
    code.push_str("    [MaxLength(255)]\n    public string? CreatedBy { get; set; }\n\n");
    code.push_str("    [MaxLength(255)]\n    public string? UpdatedBy { get; set; }\n\n");
    code.push_str("    public bool IsDeleted { get; set; }\n");
    code.push_str("}\n");
    code
}

/// DataAnnotations for a create/update DTO property.
fn annotations(field: &PlannedField) -> Vec<String> {
    let mut attrs = Vec::new();
    let (constraints, notes) = constraints(field);
    attrs.extend(notes.into_iter().map(|n| format!("// {n}")));

    if field.required {
        attrs.push(format!(
            "[Required(ErrorMessage = {})]",
            cs_str(&one_line(&field.required_message()))
        ));
    }
    match format_check(field) {
        Some((Format::Email, message)) => {
            attrs.push(format!("[EmailAddress(ErrorMessage = {})]", cs_str(&one_line(&message))));
        }
        Some((Format::Phone, message)) => attrs.push(format!(
            "[RegularExpression({}, ErrorMessage = {})]",
            cs_verbatim(PHONE_PATTERN),
            cs_str(&one_line(&message))
        )),
        None => {}
    }

    let mut min: Option<(String, String)> = None;
    let mut max: Option<(String, String)> = None;
    let mut has_pattern_attr = format_check(field).is_some_and(|(f, _)| f == Format::Phone);
    for constraint in constraints {
        match constraint {
            Constraint::MinLength(n, m) => {
                attrs.push(format!("[MinLength({n}, ErrorMessage = {})]", cs_str(&one_line(&m))));
            }
            Constraint::MaxLength(n, m) => {
                attrs.push(format!("[MaxLength({n}, ErrorMessage = {})]", cs_str(&one_line(&m))));
            }
            // RegularExpression allows one instance per property.
            Constraint::Pattern(p, m) if !has_pattern_attr => {
                has_pattern_attr = true;
                attrs.push(format!(
                    "[RegularExpression({}, ErrorMessage = {})]",
                    cs_verbatim(&p),
                    cs_str(&one_line(&m))
                ));
            }
            Constraint::Pattern(p, _) => attrs.push(format!("// pattern not enforced: {}", one_line(&p))),
            Constraint::Min(v, m) => min = Some((v, m)),
            Constraint::Max(v, m) => max = Some((v, m)),
        }
    }

    // Range allows one instance per property; min and max share it.
    let range = match (min, max) {
        (Some((lo, m)), None) => Some((lo, "double.MaxValue".to_string(), m)),
        (None, Some((hi, m))) => Some(("double.MinValue".to_string(), hi, m)),
        (Some((lo, _)), Some((hi, _))) => {
            let message = format!("Must be between {lo} and {hi}");
            Some((lo, hi, message))
        }
        (None, None) => None,
    };
    if let Some((lo, hi, message)) = range {
        attrs.push(format!(
            "[Range({lo}, {hi}, ErrorMessage = {})]",
            cs_str(&one_line(&message))
        ));
    }
    attrs
}

fn dtos(plan: &FormPlan, resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    let mut code = String::new();
    code.push_str("using System.ComponentModel.DataAnnotations;\n\n");
    code.push_str(&format!("namespace {ns}.DTOs;\n\n"));

    code.push_str(&format!("public class {pascal}Dto\n{{\n"));
    code.push_str("    public int Id { get; set; }\n");
    for field in &plan.fields {
        code.push_str(&format!("    {}\n", dto_property(field)));
    }
    code.push_str("    public DateTime CreatedAt { get; set; }\n");
    code.push_str("    public DateTime UpdatedAt { get; set; }\n");
    code.push_str("    public string? CreatedBy { get; set; }\n");
    code.push_str("    public string? UpdatedBy { get; set; }\n");
    code.push_str("}\n");

    for prefix in ["Create", "Update"] {
        code.push('\n');
        code.push_str(&format!("public class {prefix}{pascal}Dto\n{{\n"));
        let members: Vec<String> = plan
            .fields
            .iter()
            .map(|field| {
                let mut member = String::new();
                for attr in annotations(field) {
                    member.push_str(&format!("    {attr}\n"));
                }
                member.push_str(&format!("    {}\n", dto_property(field)));
                member
            })
            .collect();
        code.push_str(&members.join("\n"));
        code.push_str("}\n");
    }
    code
}

fn api_response(ns: &str) -> String {
    let mut code = String::new();
    code.push_str(&format!("namespace {ns}.Models;\n\n"));
    code.push_str("/// <summary>Envelope for every API response.</summary>\n");
    code.push_str("public class ApiResponse<T>\n{\n");
    code.push_str("    public bool Success { get; init; }\n");
    code.push_str("    public T? Data { get; init; }\n");
    code.push_str("    public object? Error { get; init; }\n");
    code.push_str("    public string? Message { get; init; }\n\n");
    code.push_str("    public static ApiResponse<T> Ok(T data, string? message = null) =>\n");
    code.push_str("        new() { Success = true, Data = data, Message = message };\n\n");
    code.push_str("    public static ApiResponse<T> Fail(string message, object? error = null) =>\n");
    code.push_str("        new() { Success = false, Error = error, Message = message };\n");
    code.push_str("}\n");
    code
}

fn paged_result(ns: &str) -> String {
    let mut code = String::new();
    code.push_str(&format!("namespace {ns}.Models;\n\n"));
    code.push_str("public class PagedResult<T>\n{\n");
    code.push_str("    public IReadOnlyList<T> Items { get; init; } = Array.Empty<T>();\n");
    code.push_str("    public int PageNumber { get; init; }\n");
    code.push_str("    public int PageSize { get; init; }\n");
    code.push_str("    public int TotalCount { get; init; }\n");
    code.push_str("    public int TotalPages => PageSize == 0 ? 0 : (int)Math.Ceiling(TotalCount / (double)PageSize);\n");
    code.push_str("}\n");
    code
}

fn service_interface(resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    let mut code = String::new();
    code.push_str(&format!("using {ns}.DTOs;\n"));
    code.push_str(&format!("using {ns}.Models;\n\n"));
    code.push_str(&format!("namespace {ns}.Services;\n\n"));
    code.push_str(&format!("public interface I{pascal}Service\n{{\n"));
    code.push_str(&format!(
        "    Task<PagedResult<{pascal}Dto>> GetAllAsync(int pageNumber, int pageSize);\n"
    ));
    code.push_str(&format!("    Task<{pascal}Dto?> GetByIdAsync(int id);\n"));
    code.push_str(&format!("    Task<{pascal}Dto> CreateAsync(Create{pascal}Dto dto);\n"));
    code.push_str(&format!("    Task<{pascal}Dto?> UpdateAsync(int id, Update{pascal}Dto dto);\n"));
    code.push_str("    Task<bool> DeleteAsync(int id);\n");
    code.push_str("}\n");
    code
}

fn service(plan: &FormPlan, resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    let mut code = String::new();
    code.push_str("using Microsoft.EntityFrameworkCore;\n");
    code.push_str(&format!("using {ns}.Data;\n"));
    code.push_str(&format!("using {ns}.DTOs;\n"));
    code.push_str(&format!("using {ns}.Models;\n\n"));
    code.push_str(&format!("namespace {ns}.Services;\n\n"));
    code.push_str(&format!("public class {pascal}Service : I{pascal}Service\n{{\n"));
    code.push_str("    private readonly AppDbContext _context;\n\n");
    code.push_str(&format!("    public {pascal}Service(AppDbContext context)\n"));
    code.push_str("    {\n        _context = context;\n    }\n\n");

    code.push_str(&format!(
        "    private IQueryable<{pascal}> Active => _context.Set<{pascal}>().Where(e => !e.IsDeleted);\n\n"
    ));

    code.push_str(&format!(
        "    public async Task<PagedResult<{pascal}Dto>> GetAllAsync(int pageNumber, int pageSize)\n"
    ));
    code.push_str("    {\n");
    code.push_str("        var total = await Active.CountAsync();\n");
    code.push_str("        var items = await Active\n");
    code.push_str("            .OrderByDescending(e => e.CreatedAt)\n");
    code.push_str("            .Skip((pageNumber - 1) * pageSize)\n");
    code.push_str("            .Take(pageSize)\n");
    code.push_str("            .ToListAsync();\n");
    code.push_str(&format!("        return new PagedResult<{pascal}Dto>\n        {{\n"));
    code.push_str("            Items = items.Select(ToDto).ToList(),\n");
    code.push_str("            PageNumber = pageNumber,\n");
    code.push_str("            PageSize = pageSize,\n");
    code.push_str("            TotalCount = total,\n");
    code.push_str("        };\n    }\n\n");

    code.push_str(&format!("    public async Task<{pascal}Dto?> GetByIdAsync(int id)\n    {{\n"));
    code.push_str("        var entity = await Active.FirstOrDefaultAsync(e => e.Id == id);\n");
    code.push_str("        return entity == null ? null : ToDto(entity);\n    }\n\n");

    code.push_str(&format!("    public async Task<{pascal}Dto> CreateAsync(Create{pascal}Dto dto)\n    {{\n"));
    code.push_str(&format!("        var entity = new {pascal}();\n"));
    code.push_str("        Apply(entity, dto);\n");
    code.push_str(&format!("        _context.Set<{pascal}>().Add(entity);\n"));
    code.push_str("        await _context.SaveChangesAsync();\n");
    code.push_str("        return ToDto(entity);\n    }\n\n");

    code.push_str(&format!(
        "    public async Task<{pascal}Dto?> UpdateAsync(int id, Update{pascal}Dto dto)\n    {{\n"
    ));
    code.push_str("        var entity = await Active.FirstOrDefaultAsync(e => e.Id == id);\n");
    code.push_str("        if (entity == null)\n        {\n            return null;\n        }\n");
    code.push_str("        Apply(entity, dto);\n");
    code.push_str("        entity.UpdatedAt = DateTime.UtcNow;\n");
    code.push_str("        await _context.SaveChangesAsync();\n");
    code.push_str("        return ToDto(entity);\n    }\n\n");

    code.push_str("    public async Task<bool> DeleteAsync(int id)\n    {\n");
    code.push_str("        var entity = await Active.FirstOrDefaultAsync(e => e.Id == id);\n");
    code.push_str("        if (entity == null)\n        {\n            return false;\n        }\n");
    code.push_str("        entity.IsDeleted = true;\n");
    code.push_str("        entity.UpdatedAt = DateTime.UtcNow;\n");
    code.push_str("        await _context.SaveChangesAsync();\n");
    code.push_str("        return true;\n    }\n\n");

    code.push_str(&format!("    private static {pascal}Dto ToDto({pascal} entity) => new()\n    {{\n"));
    code.push_str("        Id = entity.Id,\n");
    for field in &plan.fields {
        code.push_str(&format!("        {} = {},\n", field.pascal, to_dto_value(field)));
    }
    code.push_str("        CreatedAt = entity.CreatedAt,\n");
    code.push_str("        UpdatedAt = entity.UpdatedAt,\n");
    code.push_str("        CreatedBy = entity.CreatedBy,\n");
    code.push_str("        UpdatedBy = entity.UpdatedBy,\n");
    code.push_str("    };\n");

    for prefix in ["Create", "Update"] {
        code.push('\n');
        code.push_str(&format!(
            "    private static void Apply({pascal} entity, {prefix}{pascal}Dto dto)\n    {{\n"
        ));
        for field in &plan.fields {
            code.push_str(&format!("        entity.{} = {};\n", field.pascal, to_entity_value(field)));
        }
        code.push_str("    }\n");
    }

    if plan.fields.iter().any(|f| f.kind == FieldKind::MultiSelect) {
        code.push('\n');
        code.push_str("    private static List<string>? SplitValues(string? value) =>\n");
        code.push_str("        value?.Split(',', StringSplitOptions.RemoveEmptyEntries).ToList();\n");
    }
    code.push_str("}\n");
    code
}

fn db_context(resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    let mut code = String::new();
    code.push_str("using Microsoft.EntityFrameworkCore;\n");
    code.push_str(&format!("using {ns}.Models;\n\n"));
    code.push_str(&format!("namespace {ns}.Data;\n\n"));
    code.push_str("public class AppDbContext : DbContext\n{\n");
    code.push_str("    public AppDbContext(DbContextOptions<AppDbContext> options) : base(options)\n    {\n    }\n\n");
    code.push_str(&format!("    public DbSet<{pascal}> {pascal}Records => Set<{pascal}>();\n"));
    code.push_str("}\n");
    code
}

fn program(resource: &ProjectNames) -> String {
    let pascal = &resource.pascal;
    let ns = namespace(resource);

    let mut code = String::new();
    code.push_str("using Microsoft.AspNetCore.Mvc;\n");
    code.push_str("using Microsoft.EntityFrameworkCore;\n");
    code.push_str(&format!("using {ns}.Data;\n"));
    code.push_str(&format!("using {ns}.Models;\n"));
    code.push_str(&format!("using {ns}.Services;\n\n"));
    code.push_str("var builder = WebApplication.CreateBuilder(args);\n\n");
    code.push_str("builder.Services.AddDbContext<AppDbContext>(options =>\n");
    code.push_str("    options.UseSqlServer(builder.Configuration.GetConnectionString(\"DefaultConnection\")));\n");
    code.push_str(&format!("builder.Services.AddScoped<I{pascal}Service, {pascal}Service>();\n"));
    code.push_str("builder.Services.AddControllers().ConfigureApiBehaviorOptions(options =>\n{\n");
    code.push_str("    options.InvalidModelStateResponseFactory = context =>\n    {\n");
    code.push_str("        var errors = context.ModelState\n");
    code.push_str("            .Where(entry => entry.Value?.Errors.Count > 0)\n");
    code.push_str("            .ToDictionary(entry => entry.Key, entry => entry.Value!.Errors.Select(e => e.ErrorMessage).ToArray());\n");
    code.push_str("        return new BadRequestObjectResult(ApiResponse<object>.Fail(\"Validation failed\", errors));\n");
    code.push_str("    };\n});\n");
    code.push_str("builder.Services.AddEndpointsApiExplorer();\n");
    code.push_str("builder.Services.AddSwaggerGen();\n\n");
    code.push_str("var app = builder.Build();\n\n");
    code.push_str("if (app.Environment.IsDevelopment())\n{\n");
    code.push_str("    app.UseSwagger();\n    app.UseSwaggerUI();\n}\n\n");
    code.push_str("app.MapControllers();\n");
    code.push_str("app.Run();\n\n");
    code.push_str("public partial class Program\n{\n}\n");
    code
}

/// xUnit tests for the controller against an in-memory fake service.
pub(super) fn emit_tests(resource: &ProjectNames) -> Vec<GeneratedFile> {
    let pascal = &resource.pascal;
    let ns = namespace(resource);
    let dir = format!("backend/tests/{ns}.Tests");
    let dto = format!("{pascal}Dto");

    let mut code = String::new();
    code.push_str("using Microsoft.AspNetCore.Mvc;\n");
    code.push_str("using Microsoft.Extensions.Logging.Abstractions;\n");
    code.push_str(&format!("using {ns}.Controllers;\n"));
    code.push_str(&format!("using {ns}.DTOs;\n"));
    code.push_str(&format!("using {ns}.Models;\n"));
    code.push_str(&format!("using {ns}.Services;\n"));
    code.push_str("using Xunit;\n\n");
    code.push_str(&format!("namespace {ns}.Tests;\n\n"));
    code.push_str(&format!("public class {pascal}ControllerTests\n{{\n"));

    code.push_str(&format!("    private sealed class FakeService : I{pascal}Service\n    {{\n"));
    code.push_str(&format!("        public {dto}? Stored {{ get; set; }}\n\n"));
    code.push_str(&format!(
        "        public Task<PagedResult<{dto}>> GetAllAsync(int pageNumber, int pageSize) =>\n"
    ));
    code.push_str(&format!(
        "            Task.FromResult(new PagedResult<{dto}> {{ Items = Stored == null ? new List<{dto}>() : new List<{dto}> {{ Stored }}, PageNumber = pageNumber, PageSize = pageSize, TotalCount = Stored == null ? 0 : 1 }});\n\n"
    ));
    code.push_str(&format!(
        "        public Task<{dto}?> GetByIdAsync(int id) => Task.FromResult(Stored?.Id == id ? Stored : null);\n\n"
    ));
    code.push_str(&format!("        public Task<{dto}> CreateAsync(Create{dto} dto)\n        {{\n"));
    code.push_str(&format!("            Stored = new {dto} {{ Id = 1 }};\n"));
    code.push_str("            return Task.FromResult(Stored);\n        }\n\n");
    code.push_str(&format!(
        "        public Task<{dto}?> UpdateAsync(int id, Update{dto} dto) => Task.FromResult(Stored?.Id == id ? Stored : null);\n\n"
    ));
    code.push_str("        public Task<bool> DeleteAsync(int id) => Task.FromResult(Stored?.Id == id);\n");
    code.push_str("    }\n\n");

    code.push_str(&format!(
        "    private static {pascal}Controller CreateController(FakeService service) =>\n        new(service, NullLogger<{pascal}Controller>.Instance);\n\n"
    ));

    code.push_str("    [Fact]\n");
    code.push_str("    public async Task GetById_ReturnsNotFound_WhenMissing()\n    {\n");
    code.push_str("        var controller = CreateController(new FakeService());\n\n");
    code.push_str("        var response = await controller.GetById(42);\n\n");
    code.push_str("        var result = Assert.IsType<NotFoundObjectResult>(response.Result);\n");
    code.push_str("        Assert.Equal(404, result.StatusCode);\n    }\n\n");

    code.push_str("    [Fact]\n");
    code.push_str("    public async Task Create_ReturnsCreated()\n    {\n");
    code.push_str("        var controller = CreateController(new FakeService());\n\n");
    code.push_str(&format!("        var response = await controller.Create(new Create{dto}());\n\n"));
    code.push_str("        var result = Assert.IsType<CreatedAtActionResult>(response.Result);\n");
    code.push_str("        Assert.Equal(201, result.StatusCode);\n");
    code.push_str(&format!(
        "        var body = Assert.IsType<ApiResponse<{dto}>>(result.Value);\n"
    ));
    code.push_str("        Assert.True(body.Success);\n    }\n\n");

    code.push_str("    [Fact]\n");
    code.push_str("    public async Task Delete_ReturnsNotFound_WhenMissing()\n    {\n");
    code.push_str("        var controller = CreateController(new FakeService());\n\n");
    code.push_str("        var response = await controller.Delete(7);\n\n");
    code.push_str("        Assert.IsType<NotFoundObjectResult>(response.Result);\n    }\n");
    code.push_str("}\n");

    vec![
        GeneratedFile::new(
            format!("{pascal}ControllerTests.cs"),
            code,
            Language::CSharp,
            Category::Tests,
        )
        .at(dir.clone()),
        GeneratedFile::new(
            format!("{ns}.Tests.csproj"),
            manifest::test_csproj(&ns),
            Language::Xml,
            Category::Tests,
        )
        .at(dir),
    ]
}

//! Express + TypeORM API.

use crate::manifest;
use crate::plan::{FormPlan, PlannedField, ProjectNames};
use crate::text::{js_regex, js_str};
use crate::validation::{Constraint, Format, PHONE_PATTERN, constraints, format_check};
use formforge_core::mapping::{mapping, orm_column_type};
use formforge_core::{Category, FieldKind, GeneratedFile, GenerationResult, Language};

const SRC: &str = "backend/src";

fn ts_file(name: String, code: String, dir: &str) -> GeneratedFile {
    GeneratedFile::new(name, code, Language::TypeScript, Category::Backend).at(dir)
}

pub(super) fn emit(plan: &FormPlan, resource: &ProjectNames) -> GenerationResult<Vec<GeneratedFile>> {
    let camel = &resource.camel;
    Ok(vec![
        ts_file(format!("{camel}.routes.ts"), routes(resource), &format!("{SRC}/routes")),
        ts_file(
            format!("{camel}.controller.ts"),
            controller(resource),
            &format!("{SRC}/controllers"),
        ),
        ts_file(
            format!("{camel}.validation.ts"),
            validation(plan, resource),
            &format!("{SRC}/validation"),
        ),
        ts_file(format!("{camel}.model.ts"), entity(plan, resource), &format!("{SRC}/models")),
        ts_file(
            format!("{camel}.repository.ts"),
            repository(resource),
            &format!("{SRC}/repositories"),
        ),
        ts_file("data-source.ts".to_string(), data_source(resource), SRC),
        ts_file("index.ts".to_string(), index(resource), SRC),
        GeneratedFile::new(
            "package.json",
            manifest::backend_package_json(plan)?,
            Language::Json,
            Category::Backend,
        )
        .at("backend"),
        GeneratedFile::new(
            "tsconfig.json",
            manifest::backend_tsconfig()?,
            Language::Json,
            Category::Backend,
        )
        .at("backend"),
    ])
}

fn routes(resource: &ProjectNames) -> String {
    let ProjectNames {
        pascal, camel, kebab, ..
    } = resource;

    let mut code = String::new();
    code.push_str("import express from 'express';\n");
    code.push_str(&format!(
        "import {{ {pascal}Controller }} from '../controllers/{camel}.controller';\n"
    ));
    code.push_str(&format!(
        "import {{ validate{pascal} }} from '../validation/{camel}.validation';\n\n"
    ));
    code.push_str("const router = express.Router();\n");
    code.push_str(&format!("const controller = new {pascal}Controller();\n\n"));

    let routes = [
        ("post", "/", true, "controller.create", format!("POST /api/{kebab}: create")),
        ("get", "/", false, "controller.getAll", format!("GET /api/{kebab}: list, paged")),
        ("get", "/:id", false, "controller.getById", format!("GET /api/{kebab}/:id")),
        ("put", "/:id", true, "controller.update", format!("PUT /api/{kebab}/:id")),
        ("delete", "/:id", false, "controller.delete", format!("DELETE /api/{kebab}/:id")),
    ];
    for (method, path, validated, handler, doc) in routes {
        code.push_str(&format!("// {doc}\n"));
        if validated {
            code.push_str(&format!("router.{method}('{path}', validate{pascal}, {handler});\n"));
        } else {
            code.push_str(&format!("router.{method}('{path}', {handler});\n"));
        }
    }
    code.push_str("\nexport default router;\n");
    code
}

/// A controller action wrapped in the envelope's try/catch.
fn action(name: &str, body: &str, failure: &str) -> String {
    let mut code = String::new();
    code.push_str(&format!("  {name} = async (req: Request, res: Response): Promise<void> => {{\n"));
    code.push_str("    try {\n");
    code.push_str(body);
    code.push_str("    } catch (error) {\n");
    code.push_str("      res.status(500).json({\n");
    code.push_str("        success: false,\n");
    code.push_str("        error: error instanceof Error ? error.message : String(error),\n");
    code.push_str(&format!("        message: '{failure}',\n"));
    code.push_str("      });\n");
    code.push_str("    }\n");
    code.push_str("  };\n");
    code
}

fn not_found(pascal: &str) -> String {
    format!(
        "      if (!result) {{\n        res.status(404).json({{ success: false, message: '{pascal} not found' }});\n        return;\n      }}\n"
    )
}

fn controller(resource: &ProjectNames) -> String {
    let ProjectNames { pascal, camel, .. } = resource;
    let repo = format!("this.{camel}Repository");

    let mut code = String::new();
    code.push_str("import { Request, Response } from 'express';\n");
    code.push_str(&format!(
        "import {{ {pascal}Repository }} from '../repositories/{camel}.repository';\n\n"
    ));
    code.push_str(&format!("export class {pascal}Controller {{\n"));
    code.push_str(&format!(
        "  private {camel}Repository = new {pascal}Repository();\n\n"
    ));

    let create = format!(
        "      const result = await {repo}.create(req.body);\n      res.status(201).json({{ success: true, data: result, message: '{pascal} created successfully' }});\n"
    );
    code.push_str(&action("create", &create, &format!("Failed to create {pascal}")));
    code.push('\n');

    let mut get_all = String::new();
    get_all.push_str("      const page = Math.max(parseInt(String(req.query.page), 10) || 1, 1);\n");
    get_all.push_str("      const limit = Math.max(parseInt(String(req.query.limit), 10) || 10, 1);\n");
    get_all.push_str(&format!("      const result = await {repo}.findAll(page, limit);\n"));
    get_all.push_str("      res.status(200).json({\n");
    get_all.push_str("        success: true,\n");
    get_all.push_str("        data: result.data,\n");
    get_all.push_str("        pagination: {\n");
    get_all.push_str("          page: result.page,\n");
    get_all.push_str("          limit: result.limit,\n");
    get_all.push_str("          total: result.total,\n");
    get_all.push_str("          totalPages: result.totalPages,\n");
    get_all.push_str("        },\n");
    get_all.push_str("      });\n");
    code.push_str(&action("getAll", &get_all, &format!("Failed to fetch {pascal} records")));
    code.push('\n');

    let mut get_by_id = String::from("      const id = parseInt(req.params.id, 10);\n");
    get_by_id.push_str(&format!("      const result = await {repo}.findById(id);\n"));
    get_by_id.push_str(&not_found(pascal));
    get_by_id.push_str("      res.status(200).json({ success: true, data: result });\n");
    code.push_str(&action("getById", &get_by_id, &format!("Failed to fetch {pascal}")));
    code.push('\n');

    let mut update = String::from("      const id = parseInt(req.params.id, 10);\n");
    update.push_str(&format!("      const result = await {repo}.update(id, req.body);\n"));
    update.push_str(&not_found(pascal));
    update.push_str(&format!(
        "      res.status(200).json({{ success: true, data: result, message: '{pascal} updated successfully' }});\n"
    ));
    code.push_str(&action("update", &update, &format!("Failed to update {pascal}")));
    code.push('\n');

    let mut delete = String::from("      const id = parseInt(req.params.id, 10);\n");
    delete.push_str(&format!("      const result = await {repo}.delete(id);\n"));
    delete.push_str(&not_found(pascal));
    delete.push_str(&format!(
        "      res.status(200).json({{ success: true, message: '{pascal} deleted successfully' }});\n"
    ));
    code.push_str(&action("delete", &delete, &format!("Failed to delete {pascal}")));

    code.push_str("}\n");
    code
}

/// express-validator chain for one field.
fn validator_chain(field: &PlannedField) -> String {
    let mut lines = Vec::new();
    if field.required {
        lines.push(format!(
            ".notEmpty().withMessage({})",
            js_str(&field.required_message())
        ));
        lines.push(".bail()".to_string());
    } else {
        lines.push(".optional({ values: 'falsy' })".to_string());
    }

    match field.kind {
        FieldKind::Number => lines.push(".isNumeric().withMessage('Must be a number')".to_string()),
        FieldKind::Date => lines.push(".isISO8601().withMessage('Invalid date format')".to_string()),
        FieldKind::Checkbox => lines.push(".isBoolean().withMessage('Must be true or false')".to_string()),
        FieldKind::MultiSelect => lines.push(".isArray().withMessage('Must be a list')".to_string()),
        _ => {}
    }

    if let Some((format, message)) = format_check(field) {
        match format {
            Format::Email => lines.push(format!(".isEmail().withMessage({})", js_str(&message))),
            Format::Phone => lines.push(format!(
                ".matches({}).withMessage({})",
                js_regex(PHONE_PATTERN),
                js_str(&message)
            )),
        }
    }

    let (constraints, notes) = constraints(field);
    for constraint in constraints {
        let line = match constraint {
            Constraint::MinLength(n, m) => format!(".isLength({{ min: {n} }}).withMessage({})", js_str(&m)),
            Constraint::MaxLength(n, m) => format!(".isLength({{ max: {n} }}).withMessage({})", js_str(&m)),
            Constraint::Pattern(p, m) => format!(".matches({}).withMessage({})", js_regex(&p), js_str(&m)),
            Constraint::Min(v, m) => format!(".isFloat({{ min: {v} }}).withMessage({})", js_str(&m)),
            Constraint::Max(v, m) => format!(".isFloat({{ max: {v} }}).withMessage({})", js_str(&m)),
        };
        lines.push(line);
    }

    let mut code = String::new();
    for note in notes {
        code.push_str(&format!("  // {note}\n"));
    }
    code.push_str(&format!("  body({})", js_str(&field.ident)));
    for line in lines {
        code.push_str(&format!("\n    {line}"));
    }
    code.push_str(",\n");
    code
}

fn validation(plan: &FormPlan, resource: &ProjectNames) -> String {
    let mut code = String::new();
    code.push_str("import { body, validationResult } from 'express-validator';\n");
    code.push_str("import { Request, Response, NextFunction } from 'express';\n\n");
    code.push_str(&format!("export const validate{} = [\n", resource.pascal));
    for field in &plan.fields {
        code.push_str(&validator_chain(field));
    }
    code.push_str("  (req: Request, res: Response, next: NextFunction) => {\n");
    code.push_str("    const errors = validationResult(req);\n");
    code.push_str("    if (!errors.isEmpty()) {\n");
    code.push_str("      res.status(400).json({\n");
    code.push_str("        success: false,\n");
    code.push_str("        error: errors.array(),\n");
    code.push_str("        message: 'Validation failed',\n");
    code.push_str("      });\n");
    code.push_str("      return;\n");
    code.push_str("    }\n");
    code.push_str("    next();\n");
    code.push_str("  },\n");
    code.push_str("];\n");
    code
}

fn entity_column(field: &PlannedField) -> String {
    let mut options = vec![
        format!("name: '{}'", field.column),
        format!("type: '{}'", orm_column_type(field.kind)),
    ];
    if field.kind == FieldKind::Checkbox {
        options.push("default: false".to_string());
    }
    if !field.required {
        options.push("nullable: true".to_string());
    }
    let marker = if field.required { "!" } else { "?" };
    format!(
        "  @Column({{ {} }})\n  {}{marker}: {};\n",
        options.join(", "),
        field.ident,
        mapping(field.kind).entity_ts_type
    )
}

fn entity(plan: &FormPlan, resource: &ProjectNames) -> String {
    let mut code = String::new();
    code.push_str(
        "import { Entity, PrimaryGeneratedColumn, Column, CreateDateColumn, UpdateDateColumn } from 'typeorm';\n\n",
    );
    code.push_str(&format!("@Entity('{}')\n", resource.snake));
    code.push_str(&format!("export class {} {{\n", resource.pascal));
    code.push_str("  @PrimaryGeneratedColumn()\n  id!: number;\n\n");
    for field in &plan.fields {
        code.push_str(&entity_column(field));
        code.push('\n');
    }
    code.push_str("  @CreateDateColumn({ name: 'created_at' })\n  createdAt!: Date;\n\n");
    code.push_str("  @UpdateDateColumn({ name: 'updated_at' })\n  updatedAt!: Date;\n\n");
    code.push_str("  @Column({ name: 'created_by', type: 'varchar', nullable: true })\n  createdBy?: string;\n\n");
    code.push_str("  @Column({ name: 'updated_by', type: 'varchar', nullable: true })\n  updatedBy?: string;\n");
    code.push_str("}\n");
    code
}

fn repository(resource: &ProjectNames) -> String {
    let ProjectNames { pascal, camel, .. } = resource;

    let mut code = String::new();
    code.push_str("import { Repository } from 'typeorm';\n");
    code.push_str("import { AppDataSource } from '../data-source';\n");
    code.push_str(&format!("import {{ {pascal} }} from '../models/{camel}.model';\n\n"));
    code.push_str("export interface PagedResult<T> {\n");
    code.push_str("  data: T[];\n  page: number;\n  limit: number;\n  total: number;\n  totalPages: number;\n");
    code.push_str("}\n\n");
    code.push_str(&format!("export class {pascal}Repository {{\n"));
    code.push_str(&format!("  private get repository(): Repository<{pascal}> {{\n"));
    code.push_str(&format!("    return AppDataSource.getRepository({pascal});\n"));
    code.push_str("  }\n\n");
    code.push_str(&format!(
        "  async findAll(page: number, limit: number): Promise<PagedResult<{pascal}>> {{\n"
    ));
    code.push_str("    const [data, total] = await this.repository.findAndCount({\n");
    code.push_str("      order: { createdAt: 'DESC' },\n");
    code.push_str("      skip: (page - 1) * limit,\n");
    code.push_str("      take: limit,\n");
    code.push_str("    });\n");
    code.push_str("    return { data, page, limit, total, totalPages: Math.ceil(total / limit) };\n");
    code.push_str("  }\n\n");
    code.push_str(&format!("  async findById(id: number): Promise<{pascal} | null> {{\n"));
    code.push_str("    return this.repository.findOneBy({ id });\n");
    code.push_str("  }\n\n");
    code.push_str(&format!("  async create(data: Partial<{pascal}>): Promise<{pascal}> {{\n"));
    code.push_str("    return this.repository.save(this.repository.create(data));\n");
    code.push_str("  }\n\n");
    code.push_str(&format!(
        "  async update(id: number, data: Partial<{pascal}>): Promise<{pascal} | null> {{\n"
    ));
    code.push_str("    const existing = await this.findById(id);\n");
    code.push_str("    if (!existing) return null;\n");
    code.push_str("    return this.repository.save(this.repository.merge(existing, data));\n");
    code.push_str("  }\n\n");
    code.push_str("  async delete(id: number): Promise<boolean> {\n");
    code.push_str("    const result = await this.repository.delete(id);\n");
    code.push_str("    return (result.affected ?? 0) > 0;\n");
    code.push_str("  }\n");
    code.push_str("}\n");
    code
}

fn data_source(resource: &ProjectNames) -> String {
    let ProjectNames { pascal, camel, snake, .. } = resource;

    let mut code = String::new();
    code.push_str("import 'reflect-metadata';\n");
    code.push_str("import { DataSource } from 'typeorm';\n");
    code.push_str(&format!("import {{ {pascal} }} from './models/{camel}.model';\n\n"));
    code.push_str("export const AppDataSource = new DataSource({\n");
    code.push_str("  type: 'postgres',\n");
    code.push_str("  host: process.env.DB_HOST ?? 'localhost',\n");
    code.push_str("  port: Number(process.env.DB_PORT ?? 5432),\n");
    code.push_str("  username: process.env.DB_USER ?? 'postgres',\n");
    code.push_str("  password: process.env.DB_PASSWORD ?? '',\n");
    code.push_str(&format!("  database: process.env.DB_NAME ?? '{snake}',\n"));
    code.push_str(&format!("  entities: [{pascal}],\n"));
    code.push_str("  synchronize: false,\n");
    code.push_str("});\n");
    code
}

fn index(resource: &ProjectNames) -> String {
    let ProjectNames { camel, kebab, .. } = resource;

    let mut code = String::new();
    code.push_str("import 'reflect-metadata';\n");
    code.push_str("import express from 'express';\n");
    code.push_str("import { AppDataSource } from './data-source';\n");
    code.push_str(&format!("import {camel}Routes from './routes/{camel}.routes';\n\n"));
    code.push_str("const app = express();\n");
    code.push_str("app.use(express.json());\n");
    code.push_str(&format!("app.use('/api/{kebab}', {camel}Routes);\n\n"));
    code.push_str("if (require.main === module) {\n");
    code.push_str("  const port = Number(process.env.PORT ?? 3000);\n");
    code.push_str("  AppDataSource.initialize()\n");
    code.push_str("    .then(() => app.listen(port, () => console.log(`API listening on port ${port}`)))\n");
    code.push_str("    .catch((error) => {\n");
    code.push_str("      console.error('Database connection failed', error);\n");
    code.push_str("      process.exit(1);\n");
    code.push_str("    });\n");
    code.push_str("}\n\n");
    code.push_str("export default app;\n");
    code
}

/// supertest suite against the router with the repository mocked out.
pub(super) fn emit_tests(plan: &FormPlan, resource: &ProjectNames) -> GeneratedFile {
    let ProjectNames {
        pascal, camel, kebab, ..
    } = resource;
    let base = format!("/api/{kebab}");

    let mut code = String::new();
    code.push_str("import request from 'supertest';\n");
    code.push_str("import app from '../index';\n");
    code.push_str(&format!(
        "import {{ {pascal}Repository }} from '../repositories/{camel}.repository';\n\n"
    ));
    code.push_str(&format!("jest.mock('../repositories/{camel}.repository');\n\n"));
    code.push_str(&format!("const repository = {pascal}Repository.prototype as jest.Mocked<{pascal}Repository>;\n\n"));
    code.push_str(&format!("describe('{base}', () => {{\n"));
    code.push_str("  afterEach(() => jest.resetAllMocks());\n\n");

    code.push_str("  it('lists records with pagination', async () => {\n");
    code.push_str("    repository.findAll.mockResolvedValue({ data: [], page: 1, limit: 10, total: 0, totalPages: 0 });\n");
    code.push_str(&format!("    const response = await request(app).get('{base}');\n"));
    code.push_str("    expect(response.status).toBe(200);\n");
    code.push_str("    expect(response.body.success).toBe(true);\n");
    code.push_str("    expect(response.body.pagination.page).toBe(1);\n");
    code.push_str("  });\n\n");

    code.push_str("  it('returns 404 for a missing record', async () => {\n");
    code.push_str("    repository.findById.mockResolvedValue(null);\n");
    code.push_str(&format!("    const response = await request(app).get('{base}/999');\n"));
    code.push_str("    expect(response.status).toBe(404);\n");
    code.push_str(&format!("    expect(response.body.message).toBe('{pascal} not found');\n"));
    code.push_str("  });\n\n");

    code.push_str("  it('returns 500 when the repository fails', async () => {\n");
    code.push_str("    repository.findById.mockRejectedValue(new Error('boom'));\n");
    code.push_str(&format!("    const response = await request(app).get('{base}/1');\n"));
    code.push_str("    expect(response.status).toBe(500);\n");
    code.push_str("    expect(response.body.success).toBe(false);\n");
    code.push_str("  });\n");

    if plan.has_required() {
        code.push('\n');
        code.push_str("  it('rejects a body missing required fields', async () => {\n");
        code.push_str(&format!("    const response = await request(app).post('{base}').send({{}});\n"));
        code.push_str("    expect(response.status).toBe(400);\n");
        code.push_str("    expect(response.body.message).toBe('Validation failed');\n");
        code.push_str("    expect(repository.create).not.toHaveBeenCalled();\n");
        code.push_str("  });\n");
    }

    code.push_str("});\n");

    GeneratedFile::new(
        format!("{camel}.routes.test.ts"),
        code,
        Language::TypeScript,
        Category::Tests,
    )
    .at(format!("{SRC}/__tests__"))
}
